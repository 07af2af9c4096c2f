//! EC2 instances. Reads go through `describe-tags` with a resource-id
//! filter; writes use `create-tags`, which upserts by key.

use std::collections::HashMap;

use super::{tags_from_upper_list, upper_list_payload, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct Ec2InstanceAdapter;

fn instance_id(arn: &Arn) -> &str {
    arn.resource
        .strip_prefix("instance/")
        .unwrap_or(arn.resource.as_str())
}

impl ResourceAdapter for Ec2InstanceAdapter {
    fn name(&self) -> &'static str {
        "Ec2Instance"
    }

    fn label(&self) -> &'static str {
        "EC2 Instance"
    }

    fn service(&self) -> &'static str {
        "ec2"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("instances")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "ec2" && arn.resource.starts_with("instance/")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([("service_type".to_string(), "compute".to_string())])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        let filter = format!("Name=resource-id,Values={}", instance_id(arn));
        match session.api_call("ec2", "describe-tags", &["--filters", &filter]) {
            Ok(response) => tags_from_upper_list(response.get("Tags")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let payload = upper_list_payload(tags).to_string();
        session.api_call(
            "ec2",
            "create-tags",
            &["--resources", instance_id(arn), "--tags", &payload],
        )?;
        Ok(())
    }
}
