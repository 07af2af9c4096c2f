//! Lambda functions. The tagging API speaks plain string maps keyed by the
//! full function ARN.

use std::collections::HashMap;

use serde_json::Value;

use super::{object_payload, tags_from_object, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct LambdaFunctionAdapter;

impl ResourceAdapter for LambdaFunctionAdapter {
    fn name(&self) -> &'static str {
        "LambdaFunction"
    }

    fn label(&self) -> &'static str {
        "Lambda Function"
    }

    fn service(&self) -> &'static str {
        "lambda"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("functions")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "lambda" && arn.resource.starts_with("function:")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([("service_type".to_string(), "compute".to_string())])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        match session.api_call("lambda", "list-tags", &["--resource", &arn.raw]) {
            Ok(response) => tags_from_object(response.get("Tags")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let payload = object_payload(tags).to_string();
        session.api_call(
            "lambda",
            "tag-resource",
            &["--resource", &arn.raw, "--tags", &payload],
        )?;
        Ok(())
    }

    fn list_resources(&self, session: &AwsSession) -> Result<Vec<Arn>> {
        let response = session.api_call("lambda", "list-functions", &[])?;
        let functions = match response.get("Functions").and_then(Value::as_array) {
            Some(functions) => functions,
            None => return Ok(Vec::new()),
        };
        Ok(functions
            .iter()
            .filter_map(|function| function.get("FunctionArn").and_then(Value::as_str))
            .filter_map(|raw| Arn::parse(raw).ok())
            .collect())
    }
}
