//! IAM roles. The tagging API wants the bare role name, which is the last
//! path segment of the ARN resource; IAM is a global service so role ARNs
//! carry no region.

use std::collections::HashMap;

use super::{tags_from_upper_list, upper_list_payload, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct IamRoleAdapter;

fn role_name(arn: &Arn) -> &str {
    arn.resource
        .rsplit('/')
        .next()
        .unwrap_or(arn.resource.as_str())
}

impl ResourceAdapter for IamRoleAdapter {
    fn name(&self) -> &'static str {
        "IamRole"
    }

    fn label(&self) -> &'static str {
        "IAM Role"
    }

    fn service(&self) -> &'static str {
        "iam"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("roles")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "iam" && arn.resource.starts_with("role/")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([("service_type".to_string(), "iam".to_string())])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        match session.api_call("iam", "list-role-tags", &["--role-name", role_name(arn)]) {
            Ok(response) => tags_from_upper_list(response.get("Tags")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let payload = upper_list_payload(tags).to_string();
        session.api_call(
            "iam",
            "tag-role",
            &["--role-name", role_name(arn), "--tags", &payload],
        )?;
        Ok(())
    }
}
