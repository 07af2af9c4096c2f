//! Compliance scanning: enumerate one resource kind and report which
//! required tags each resource is missing.

use chrono::Utc;

use crate::adapters::AdapterRegistry;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::{ScanReport, ScanResourceReport, ScanStatus, ScanSummary};
use crate::template::TagTemplate;

/// Scan every resource the adapter can enumerate.
///
/// A resource is compliant when it carries every required key, whatever the
/// values. Required keys are the template's defaults and dynamic keys; fixed
/// keys are not demanded of resources tagged before the fixed layer existed.
pub fn scan_resources(
    session: &AwsSession,
    registry: &AdapterRegistry,
    service: &str,
    resource_type: Option<&str>,
    template: &TagTemplate,
) -> Result<ScanReport> {
    let adapter = registry.resolve_by_service(service, resource_type)?;
    let required = template.required_keys();

    let arns = adapter.list_resources(session)?;
    let mut summary = ScanSummary::default();
    let mut resources = Vec::with_capacity(arns.len());

    for arn in &arns {
        let current = adapter.current_tags(session, arn);
        let missing: Vec<String> = required
            .iter()
            .filter(|key| !current.contains_key(key.as_str()))
            .cloned()
            .collect();

        let status = if missing.is_empty() {
            summary.compliant += 1;
            ScanStatus::Compliant
        } else {
            summary.non_compliant += 1;
            ScanStatus::NonCompliant
        };

        resources.push(ScanResourceReport {
            name: arn.resource.clone(),
            arn: arn.raw.clone(),
            adapter: adapter.name().to_string(),
            status,
            missing_tags: missing,
        });
    }
    summary.total_resources = resources.len();

    Ok(ScanReport {
        service: adapter.service().to_string(),
        resource_type: resource_type.map(str::to_string),
        checked_at: Utc::now().to_rfc3339(),
        summary,
        resources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::command::{MockCommandExecutor, MockCommandResult};
    use crate::error::Error;
    use std::sync::Arc;

    fn scan_fixture() -> (AwsSession, AdapterRegistry, TagTemplate) {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            MockCommandResult::ok(r#"{"Buckets": [{"Name": "alpha"}, {"Name": "beta"}]}"#),
            // alpha carries both required keys, ManagedBy absent is fine
            MockCommandResult::ok(
                r#"{"TagSet": [{"Key": "Owner", "Value": "platform"}, {"Key": "Env", "Value": "prd"}]}"#,
            ),
            // beta answers NoSuchTagSet, reading as untagged
            MockCommandResult::failed("An error occurred (NoSuchTagSet)"),
        ]));
        let session = AwsSession::with_executor(None, None, executor);
        let registry = AdapterRegistry::built_in();
        let template = TagTemplate::from_str(
            "defaults:\n  Owner: platform\nfixed:\n  ManagedBy: tagsmith\ndynamic:\n  Env: \"{{environment}}\"\n",
        )
        .unwrap();
        (session, registry, template)
    }

    #[test]
    fn test_scan_classifies_and_counts() {
        let (session, registry, template) = scan_fixture();

        let report = scan_resources(&session, &registry, "s3", None, &template).unwrap();

        assert_eq!(report.service, "s3");
        assert!(report.resource_type.is_none());
        assert_eq!(report.summary.total_resources, 2);
        assert_eq!(report.summary.compliant, 1);
        assert_eq!(report.summary.non_compliant, 1);

        let alpha = &report.resources[0];
        assert_eq!(alpha.name, "alpha");
        assert_eq!(alpha.adapter, "S3Bucket");
        assert_eq!(alpha.status, ScanStatus::Compliant);
        assert!(alpha.missing_tags.is_empty());

        let beta = &report.resources[1];
        assert_eq!(beta.status, ScanStatus::NonCompliant);
        // Alphabetical; ManagedBy is a fixed key and so never demanded
        assert_eq!(beta.missing_tags, vec!["Env", "Owner"]);
    }

    #[test]
    fn test_scan_timestamp_is_rfc3339() {
        let (session, registry, template) = scan_fixture();

        let report = scan_resources(&session, &registry, "s3", None, &template).unwrap();

        assert!(chrono::DateTime::parse_from_rfc3339(&report.checked_at).is_ok());
    }

    #[test]
    fn test_scan_echoes_requested_resource_type() {
        let (session, registry, template) = scan_fixture();

        let report =
            scan_resources(&session, &registry, "s3", Some("buckets"), &template).unwrap();

        assert_eq!(report.resource_type.as_deref(), Some("buckets"));
    }

    #[test]
    fn test_scan_unknown_service_fails() {
        let (session, registry, template) = scan_fixture();

        let result = scan_resources(&session, &registry, "glacier", None, &template);
        assert!(matches!(result, Err(Error::NoAdapterForService { .. })));
    }

    #[test]
    fn test_scan_without_enumeration_support_fails() {
        let (session, registry, template) = scan_fixture();

        let result = scan_resources(&session, &registry, "ec2", None, &template);
        assert!(matches!(result, Err(Error::UnsupportedOperation { .. })));
    }
}
