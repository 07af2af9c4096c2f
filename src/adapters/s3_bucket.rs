//! S3 buckets. Tags travel as a `{"Key", "Value"}` list wrapped in a
//! `TagSet` envelope, and bucket ARNs carry no region or account.

use std::collections::HashMap;

use serde_json::{json, Value};

use super::{tags_from_upper_list, upper_list_payload, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::TagSet;

pub struct S3BucketAdapter;

impl ResourceAdapter for S3BucketAdapter {
    fn name(&self) -> &'static str {
        "S3Bucket"
    }

    fn label(&self) -> &'static str {
        "S3 Bucket"
    }

    fn service(&self) -> &'static str {
        "s3"
    }

    fn resource_type(&self) -> Option<&'static str> {
        Some("buckets")
    }

    fn supports(&self, arn: &Arn) -> bool {
        arn.service == "s3"
    }

    fn render_context(&self) -> HashMap<String, String> {
        HashMap::from([("service_type".to_string(), "storage".to_string())])
    }

    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String> {
        // Buckets without tags answer with NoSuchTagSet, which lands in the
        // error arm and reads as an empty set.
        match session.api_call("s3api", "get-bucket-tagging", &["--bucket", &arn.resource]) {
            Ok(response) => tags_from_upper_list(response.get("TagSet")),
            Err(_) => HashMap::new(),
        }
    }

    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()> {
        let tagging = json!({ "TagSet": upper_list_payload(tags) }).to_string();
        session.api_call(
            "s3api",
            "put-bucket-tagging",
            &["--bucket", &arn.resource, "--tagging", &tagging],
        )?;
        Ok(())
    }

    fn list_resources(&self, session: &AwsSession) -> Result<Vec<Arn>> {
        let response = session.api_call("s3api", "list-buckets", &[])?;
        let buckets = match response.get("Buckets").and_then(Value::as_array) {
            Some(buckets) => buckets,
            None => return Ok(Vec::new()),
        };
        Ok(buckets
            .iter()
            .filter_map(|bucket| bucket.get("Name").and_then(Value::as_str))
            .filter_map(|name| Arn::parse(&format!("arn:aws:s3:::{name}")).ok())
            .collect())
    }
}
