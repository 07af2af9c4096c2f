//! Step Functions state machines. The ARN service segment is `states` while
//! the CLI namespace is `stepfunctions`, and tag entries use lower-case
//! `key`/`value` fields.

use std::collections::HashMap;

use super::{lower_list_payload, tags_from_lower_list, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct StepFunctionsStateMachineAdapter;

impl ResourceAdapter for StepFunctionsStateMachineAdapter {
    fn name(&self) -> &'static str {
        "StepFunctionsStateMachine"
    }

    fn label(&self) -> &'static str {
        "Step Functions State Machine"
    }

    fn service(&self) -> &'static str {
        "states"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("state-machines")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "states" && arn.resource.starts_with("stateMachine:")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([
            ("service_type".to_string(), "workflow".to_string()),
            (
                "resource_type".to_string(),
                "stepfunctions-state-machine".to_string(),
            ),
        ])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        match session.api_call(
            "stepfunctions",
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
            "stepfunctions",
            "tag-resource",
            &["--resource-arn", &arn.raw, "--tags", &payload],
        )?;
        Ok(())
    }
}
