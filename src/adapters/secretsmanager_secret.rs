//! Secrets Manager secrets. `describe-secret` carries the current tags, so
//! reads need no dedicated listing call.

use std::collections::HashMap;

use super::{tags_from_upper_list, upper_list_payload, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct SecretsManagerSecretAdapter;

impl ResourceAdapter for SecretsManagerSecretAdapter {
    fn name(&self) -> &'static str {
        "SecretsManagerSecret"
    }

    fn label(&self) -> &'static str {
        "Secrets Manager Secret"
    }

    fn service(&self) -> &'static str {
        "secretsmanager"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("secrets")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "secretsmanager" && arn.resource.starts_with("secret:")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([("service_type".to_string(), "security".to_string())])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        match session.api_call(
            "secretsmanager",
            "describe-secret",
            &["--secret-id", &arn.raw],
        ) {
            Ok(response) => tags_from_upper_list(response.get("Tags")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let payload = upper_list_payload(tags).to_string();
        session.api_call(
            "secretsmanager",
            "tag-resource",
            &["--secret-id", &arn.raw, "--tags", &payload],
        )?;
        Ok(())
    }
}
