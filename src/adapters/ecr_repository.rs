//! ECR repositories. The response envelope field is lower-case `tags` but
//! each entry still uses `Key`/`Value`.

use std::collections::HashMap;

use serde_json::Value;

use super::{tags_from_upper_list, upper_list_payload, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct EcrRepositoryAdapter;

impl ResourceAdapter for EcrRepositoryAdapter {
    fn name(&self) -> &'static str {
        "EcrRepository"
    }

    fn label(&self) -> &'static str {
        "ECR Repository"
    }

    fn service(&self) -> &'static str {
        "ecr"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("repositories")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "ecr" && arn.resource.starts_with("repository/")
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([("service_type".to_string(), "container-registry".to_string())])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        match session.api_call(
            "ecr",
            "list-tags-for-resource",
            &["--resource-arn", &arn.raw],
        ) {
            Ok(response) => tags_from_upper_list(response.get("tags")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let payload = upper_list_payload(tags).to_string();
        session.api_call(
            "ecr",
            "tag-resource",
            &["--resource-arn", &arn.raw, "--tags", &payload],
        )?;
        Ok(())
    }

    fn list_resources(&self, session: &AwsSession) -> Result<Vec<Arn>> {
        let response = session.api_call("ecr", "describe-repositories", &[])?;
        let repositories = match response.get("repositories").and_then(Value::as_array) {
            Some(repositories) => repositories,
            None => return Ok(Vec::new()),
        };
        Ok(repositories
            .iter()
            .filter_map(|repository| repository.get("repositoryArn").and_then(Value::as_str))
            .filter_map(|raw| Arn::parse(raw).ok())
            .collect())
    }
}
