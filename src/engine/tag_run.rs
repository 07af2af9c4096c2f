//! Tag run orchestration: parse, resolve, render, reconcile, confirm.

use std::collections::{HashMap, HashSet};
use std::thread;
use std::time::Duration;

use serde_json::Value;

use crate::adapters::{AdapterRegistry, ResourceAdapter};
use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::error::Result;
use crate::model::{TagRunResult, TagSet};
use crate::template::{TagTemplate, TemplateContext, TemplateRenderer};

/// Confirmation reads per resource before giving up on convergence.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Delay before the second confirmation read; doubles on every retry.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, Default)]
pub struct TagRunOptions {
    pub dry_run: bool,
    pub override_existing: bool,
}

/// Apply the template to every resource, in input order, each one to
/// completion before the next starts.
///
/// Parse and render failures abort the run before that resource is touched;
/// resources already processed keep whatever was written to them.
pub fn tag_resources(
    session: &AwsSession,
    registry: &AdapterRegistry,
    arns: &[String],
    template: &TagTemplate,
    overrides: &TemplateContext,
    options: TagRunOptions,
) -> Result<Vec<TagRunResult>> {
    let renderer = TemplateRenderer::new();
    let mut results = Vec::with_capacity(arns.len());

    for raw in arns {
        let arn = Arn::parse(raw)?;
        let adapter = registry.resolve_by_arn(&arn)?;
        let desired = render_desired(&renderer, template, overrides, adapter)?;

        let mut result = adapter.apply_tags(
            session,
            &arn,
            &desired,
            options.dry_run,
            options.override_existing,
        )?;

        if !options.dry_run {
            result.applied_tags = Some(confirm_written_tags(
                adapter,
                session,
                &arn,
                &result.final_tags,
            ));
        }

        results.push(result);
    }

    Ok(results)
}

fn render_desired(
    renderer: &TemplateRenderer,
    template: &TagTemplate,
    overrides: &TemplateContext,
    adapter: &dyn ResourceAdapter,
) -> Result<TagSet> {
    // Caller-supplied context values win over adapter-contributed ones
    let mut context = overrides.clone();
    for (key, value) in adapter.render_context() {
        context.entry(key).or_insert(Value::String(value));
    }

    let rendered = renderer.render(template, &context)?;
    Ok(TagSet::from_map(&rendered))
}

/// Poll a resource until every expected key is visible or attempts run out.
///
/// Several services serve tag reads eventually-consistently, so the read
/// right after a write can miss keys. The loop reads, checks that the
/// observed keys cover `expected_keys`, and otherwise sleeps the current
/// delay and doubles it. Non-convergence is not an error: the last observed
/// map is returned as the best available answer.
pub fn read_tags_with_retry(
    mut read: impl FnMut() -> HashMap<String, String>,
    expected_keys: &HashSet<String>,
    max_attempts: u32,
    initial_delay: Duration,
    mut sleep: impl FnMut(Duration),
) -> HashMap<String, String> {
    let mut delay = initial_delay;
    let mut observed = HashMap::new();

    for attempt in 1..=max_attempts {
        observed = read();
        if expected_keys.iter().all(|key| observed.contains_key(key)) {
            break;
        }
        if attempt < max_attempts {
            sleep(delay);
            delay *= 2;
        }
    }

    observed
}

/// Confirmation read for a completed write, paced with real sleeps.
pub fn confirm_written_tags(
    adapter: &dyn ResourceAdapter,
    session: &AwsSession,
    arn: &Arn,
    written: &HashMap<String, String>,
) -> HashMap<String, String> {
    let expected: HashSet<String> = written.keys().cloned().collect();
    read_tags_with_retry(
        || adapter.current_tags(session, arn),
        &expected,
        DEFAULT_MAX_ATTEMPTS,
        DEFAULT_INITIAL_DELAY,
        thread::sleep,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::command::{MockCommandExecutor, MockCommandResult};
    use serde_json::json;
    use std::sync::Arc;

    fn expected(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_retry_stops_on_first_converged_read() {
        let mut reads = 0;
        let mut sleeps = Vec::new();

        let observed = read_tags_with_retry(
            || {
                reads += 1;
                tags(&[("Owner", "platform"), ("Env", "prd")])
            },
            &expected(&["Owner", "Env"]),
            5,
            Duration::from_millis(500),
            |delay| sleeps.push(delay),
        );

        assert_eq!(reads, 1);
        assert!(sleeps.is_empty());
        assert_eq!(observed.len(), 2);
    }

    #[test]
    fn test_retry_backs_off_until_keys_appear() {
        let mut snapshots = vec![
            tags(&[]),
            tags(&[("Owner", "platform")]),
            tags(&[("Owner", "platform"), ("Env", "prd")]),
        ]
        .into_iter();
        let mut sleeps = Vec::new();

        let observed = read_tags_with_retry(
            || snapshots.next().unwrap_or_default(),
            &expected(&["Owner", "Env"]),
            5,
            Duration::from_millis(500),
            |delay| sleeps.push(delay),
        );

        assert_eq!(
            sleeps,
            vec![Duration::from_millis(500), Duration::from_millis(1000)]
        );
        assert_eq!(observed["Env"], "prd");
    }

    #[test]
    fn test_retry_exhaustion_returns_last_observed() {
        let mut reads = 0;
        let mut sleeps = Vec::new();

        let observed = read_tags_with_retry(
            || {
                reads += 1;
                tags(&[("Owner", "platform")])
            },
            &expected(&["Owner", "Env"]),
            5,
            Duration::from_millis(500),
            |delay| sleeps.push(delay),
        );

        // Five reads but only four sleeps: no pause after the final attempt
        assert_eq!(reads, 5);
        assert_eq!(
            sleeps,
            vec![
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000),
            ]
        );
        assert_eq!(observed, tags(&[("Owner", "platform")]));
    }

    #[test]
    fn test_retry_accepts_supersets_of_expected_keys() {
        let mut sleeps = Vec::new();

        let observed = read_tags_with_retry(
            || tags(&[("Owner", "platform"), ("Legacy", "keep")]),
            &expected(&["Owner"]),
            5,
            Duration::from_millis(500),
            |delay| sleeps.push(delay),
        );

        assert!(sleeps.is_empty());
        assert_eq!(observed.len(), 2);
    }

    #[test]
    fn test_retry_with_nothing_expected_converges_immediately() {
        let mut reads = 0;

        read_tags_with_retry(
            || {
                reads += 1;
                HashMap::new()
            },
            &HashSet::new(),
            5,
            Duration::from_millis(500),
            |_| panic!("should not sleep"),
        );

        assert_eq!(reads, 1);
    }

    fn template_from(source: &str) -> TagTemplate {
        TagTemplate::from_str(source).unwrap()
    }

    fn context_from(value: Value) -> TemplateContext {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn test_tag_resources_dry_run_reads_but_never_writes() {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            MockCommandResult::ok(r#"{"TagSet": [{"Key": "Legacy", "Value": "keep"}]}"#),
        ]));
        let session = AwsSession::with_executor(None, None, executor.clone());
        let registry = AdapterRegistry::built_in();
        let template = template_from(
            "defaults:\n  Owner: platform\nfixed:\n  ManagedBy: tagsmith\ndynamic:\n  Env: \"{{environment}}\"\n",
        );
        let overrides = context_from(json!({"environment": "prd"}));

        let results = tag_resources(
            &session,
            &registry,
            &["arn:aws:s3:::assets".to_string()],
            &template,
            &overrides,
            TagRunOptions {
                dry_run: true,
                override_existing: false,
            },
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.desired_tags["Env"], "prd");
        assert_eq!(result.desired_tags["ManagedBy"], "tagsmith");
        assert_eq!(result.existing_tags["Legacy"], "keep");
        assert_eq!(result.final_tags.len(), 4);
        assert!(result.applied_tags.is_none());

        // Only the read went out
        assert_eq!(executor.recorded_calls().len(), 1);
    }

    #[test]
    fn test_tag_resources_confirms_written_tags() {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            // Pre-write read: untagged
            MockCommandResult::ok(r#"{"TagSet": []}"#),
            // Write
            MockCommandResult::ok(""),
            // Confirmation read: everything visible at once
            MockCommandResult::ok(
                r#"{"TagSet": [{"Key": "Owner", "Value": "platform"}, {"Key": "Env", "Value": "prd"}]}"#,
            ),
        ]));
        let session = AwsSession::with_executor(None, None, executor.clone());
        let registry = AdapterRegistry::built_in();
        let template =
            template_from("defaults:\n  Owner: platform\ndynamic:\n  Env: \"{{environment}}\"\n");
        let overrides = context_from(json!({"environment": "prd"}));

        let results = tag_resources(
            &session,
            &registry,
            &["arn:aws:s3:::assets".to_string()],
            &template,
            &overrides,
            TagRunOptions {
                dry_run: false,
                override_existing: false,
            },
        )
        .unwrap();

        let applied = results[0].applied_tags.as_ref().unwrap();
        assert_eq!(applied.len(), 2);
        assert_eq!(applied["Owner"], "platform");

        let calls = executor.recorded_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1][2], "put-bucket-tagging");
        assert_eq!(calls[2][2], "get-bucket-tagging");
    }

    #[test]
    fn test_tag_resources_caller_context_beats_adapter_context() {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            MockCommandResult::ok(r#"{"TagSet": []}"#),
        ]));
        let session = AwsSession::with_executor(None, None, executor);
        let registry = AdapterRegistry::built_in();
        let template = template_from("dynamic:\n  Kind: \"{{service_type}}\"\n");
        let overrides = context_from(json!({"service_type": "archive"}));

        let results = tag_resources(
            &session,
            &registry,
            &["arn:aws:s3:::assets".to_string()],
            &template,
            &overrides,
            TagRunOptions {
                dry_run: true,
                override_existing: false,
            },
        )
        .unwrap();

        assert_eq!(results[0].desired_tags["Kind"], "archive");
    }

    #[test]
    fn test_tag_resources_adapter_context_fills_missing_values() {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            MockCommandResult::ok(r#"{"TagSet": []}"#),
        ]));
        let session = AwsSession::with_executor(None, None, executor);
        let registry = AdapterRegistry::built_in();
        let template = template_from("dynamic:\n  Kind: \"{{service_type}}\"\n");

        let results = tag_resources(
            &session,
            &registry,
            &["arn:aws:s3:::assets".to_string()],
            &template,
            &TemplateContext::new(),
            TagRunOptions {
                dry_run: true,
                override_existing: false,
            },
        )
        .unwrap();

        assert_eq!(results[0].desired_tags["Kind"], "storage");
    }

    #[test]
    fn test_tag_resources_render_failure_aborts_before_any_call() {
        let executor = Arc::new(MockCommandExecutor::new());
        let session = AwsSession::with_executor(None, None, executor.clone());
        let registry = AdapterRegistry::built_in();
        let template = template_from("dynamic:\n  Env: \"{{environment}}\"\n");

        let result = tag_resources(
            &session,
            &registry,
            &["arn:aws:s3:::assets".to_string()],
            &template,
            &TemplateContext::new(),
            TagRunOptions::default(),
        );

        assert!(matches!(
            result,
            Err(crate::error::Error::UndefinedContextVariable { .. })
        ));
        assert!(executor.recorded_calls().is_empty());
    }

    #[test]
    fn test_tag_resources_rejects_invalid_arn() {
        let session =
            AwsSession::with_executor(None, None, Arc::new(MockCommandExecutor::new()));
        let registry = AdapterRegistry::built_in();
        let template = template_from("defaults:\n  Owner: platform\n");

        let result = tag_resources(
            &session,
            &registry,
            &["not-an-arn".to_string()],
            &template,
            &TemplateContext::new(),
            TagRunOptions::default(),
        );

        assert!(matches!(result, Err(crate::error::Error::InvalidArn(_))));
    }

    #[test]
    fn test_tag_resources_processes_arns_in_input_order() {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            MockCommandResult::ok(r#"{"TagSet": []}"#),
            MockCommandResult::ok(r#"{"Tags": {}}"#),
        ]));
        let session = AwsSession::with_executor(None, None, executor);
        let registry = AdapterRegistry::built_in();
        let template = template_from("defaults:\n  Owner: platform\n");

        let results = tag_resources(
            &session,
            &registry,
            &[
                "arn:aws:s3:::assets".to_string(),
                "arn:aws:lambda:us-east-1:123456789012:function:billing".to_string(),
            ],
            &template,
            &TemplateContext::new(),
            TagRunOptions {
                dry_run: true,
                override_existing: false,
            },
        )
        .unwrap();

        assert_eq!(results[0].resource_label, "S3 Bucket");
        assert_eq!(results[1].resource_label, "Lambda Function");
    }
}
