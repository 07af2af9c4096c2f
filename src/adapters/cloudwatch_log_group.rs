//! CloudWatch log groups. The tagging API addresses groups by name, so the
//! `log-group:` prefix and the `:*` suffix both come off the ARN resource
//! before any call.

use std::collections::HashMap;

use serde_json::Value;

use super::{object_payload, tags_from_object, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct CloudWatchLogGroupAdapter;

fn log_group_name(arn: &Arn) -> &str {
    let name = arn
        .resource
        .strip_prefix("log-group:")
        .unwrap_or(arn.resource.as_str());
    // Group names never contain ':', so anything after one is ARN suffix
    // such as the ':*' wildcard
    name.split(':').next().unwrap_or(name)
}

impl ResourceAdapter for CloudWatchLogGroupAdapter {
    fn name(&self) -> &'static str {
        "CloudWatchLogGroup"
    }

    fn label(&self) -> &'static str {
        "CloudWatch Log Group"
    }

    fn service(&self) -> &'static str {
        "logs"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("log-groups")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "logs" && arn.resource.starts_with("log-group:")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([("service_type".to_string(), "logging".to_string())])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        match session.api_call(
            "logs",
            "list-tags-log-group",
            &["--log-group-name", log_group_name(arn)],
        ) {
            Ok(response) => tags_from_object(response.get("tags")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let payload = object_payload(tags).to_string();
        session.api_call(
            "logs",
            "tag-log-group",
            &["--log-group-name", log_group_name(arn), "--tags", &payload],
        )?;
        Ok(())
    }

    fn list_resources(&self, session: &AwsSession) -> Result<Vec<Arn>> {
        let response = session.api_call("logs", "describe-log-groups", &[])?;
        let groups = match response.get("logGroups").and_then(Value::as_array) {
            Some(groups) => groups,
            None => return Ok(Vec::new()),
        };
        Ok(groups
            .iter()
            .filter_map(|group| group.get("arn").and_then(Value::as_str))
            .filter_map(|raw| Arn::parse(raw).ok())
            .collect())
    }
}
