//! ECS task definitions. Revisions are part of the ARN, and tag entries use
//! lower-case `key`/`value` fields.

use std::collections::HashMap;

use super::{lower_list_payload, tags_from_lower_list, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct EcsTaskDefinitionAdapter;

impl ResourceAdapter for EcsTaskDefinitionAdapter {
    fn name(&self) -> &'static str {
        "EcsTaskDefinition"
    }

    fn label(&self) -> &'static str {
        "ECS Task Definition"
    }

    fn service(&self) -> &'static str {
        "ecs"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("task-definitions")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "ecs" && arn.resource.starts_with("task-definition/")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([
            ("service_type".to_string(), "compute".to_string()),
            (
                "resource_type".to_string(),
                "ecs-task-definition".to_string(),
            ),
        ])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        match session.api_call(
            "ecs",
            "list-tags-for-resource",
            &["--resource-arn", &arn.raw],
        ) {
            Ok(response) => tags_from_lower_list(response.get("tags")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let payload = lower_list_payload(tags).to_string();
        session.api_call(
            "ecs",
            "tag-resource",
            &["--resource-arn", &arn.raw, "--tags", &payload],
        )?;
        Ok(())
    }
}
