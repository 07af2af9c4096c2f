//! DynamoDB tables, addressed by full ARN.

use std::collections::HashMap;

use super::{tags_from_upper_list, upper_list_payload, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct DynamoDbTableAdapter;

impl ResourceAdapter for DynamoDbTableAdapter {
    fn name(&self) -> &'static str {
        "DynamoDbTable"
    }

    fn label(&self) -> &'static str {
        "DynamoDB Table"
    }

    fn service(&self) -> &'static str {
        "dynamodb"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("tables")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "dynamodb" && arn.resource.starts_with("table/")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([("service_type".to_string(), "database".to_string())])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        match session.api_call(
            "dynamodb",
            "list-tags-of-resource",
            &["--resource-arn", &arn.raw],
        ) {
            Ok(response) => tags_from_upper_list(response.get("Tags")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let payload = upper_list_payload(tags).to_string();
        session.api_call(
            "dynamodb",
            "tag-resource",
            &["--resource-arn", &arn.raw, "--tags", &payload],
        )?;
        Ok(())
    }
}
