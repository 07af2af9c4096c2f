//! Resource adapters: one per taggable AWS resource kind.
//!
//! Every adapter translates between its service's tag wire shape and the flat
//! key/value model the engines work with. Dispatch is capability-based: the
//! registry walks its adapters in registration order and the first one whose
//! `supports` accepts the ARN handles the resource.

mod cloudwatch_log_group;
mod dynamodb_table;
mod ec2_instance;
mod ecr_repository;
mod ecs_task_definition;
mod iam_role;
mod lambda_function;
mod s3_bucket;
mod secretsmanager_secret;
mod stepfunctions_state_machine;

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde_json::{json, Value};

use crate::arn::Arn;
use crate::aws::session::AwsSession;
use crate::engine::merge::merge_tags;
use crate::error::{Error, Result};
use crate::model::{TagRunResult, TagSet};

use cloudwatch_log_group::CloudWatchLogGroupAdapter;
use dynamodb_table::DynamoDbTableAdapter;
use ec2_instance::Ec2InstanceAdapter;
use ecr_repository::EcrRepositoryAdapter;
use ecs_task_definition::EcsTaskDefinitionAdapter;
use iam_role::IamRoleAdapter;
use lambda_function::LambdaFunctionAdapter;
use s3_bucket::S3BucketAdapter;
use secretsmanager_secret::SecretsManagerSecretAdapter;
use stepfunctions_state_machine::StepFunctionsStateMachineAdapter;

/// One AWS resource kind that knows how to read and write its own tags.
///
/// Reads are best-effort: a resource without tags, a missing resource, or a
/// failed call all yield an empty map so reconciliation proceeds from a clean
/// slate. Writes propagate their failures untouched.
pub trait ResourceAdapter: Send + Sync {
    /// Identifier shown in scan reports and the adapter listing.
    fn name(&self) -> &'static str;

    /// Human-friendly resource kind, e.g. "S3 Bucket".
    fn label(&self) -> &'static str;

    /// The ARN service segment this adapter serves.
    fn service(&self) -> &'static str;

    /// Sub-kind for services with more than one taggable resource kind.
    fn resource_type(&self) -> Option<&'static str> {
        None
    }

    /// Whether this adapter can handle the given ARN.
    fn supports(&self, arn: &Arn) -> bool;

    /// Values this adapter contributes to dynamic tag expressions.
    fn render_context(&self) -> HashMap<String, String>;

    /// Read the tags currently on the resource.
    fn current_tags(&self, session: &AwsSession, arn: &Arn) -> HashMap<String, String>;

    /// Write the full tag set to the resource.
    fn write_tags(&self, session: &AwsSession, arn: &Arn, tags: &TagSet) -> Result<()>;

    /// Enumerate every ARN of this resource kind visible to the session.
    fn list_resources(&self, _session: &AwsSession) -> Result<Vec<Arn>> {
        Err(Error::UnsupportedOperation {
            adapter: self.name().to_string(),
            operation: "resource enumeration".to_string(),
        })
    }

    /// Reconcile the desired tags against the resource and, unless `dry_run`
    /// is set, write the merged result back. The post-write confirmation
    /// read is the caller's responsibility.
    fn apply_tags(
        &self,
        session: &AwsSession,
        arn: &Arn,
        desired: &TagSet,
        dry_run: bool,
        override_existing: bool,
    ) -> Result<TagRunResult> {
        let existing = self.current_tags(session, arn);
        let desired_map = desired.to_map();
        let final_tags = merge_tags(&desired_map, &existing, override_existing);

        if !dry_run {
            self.write_tags(session, arn, &TagSet::from_map(&final_tags))?;
        }

        Ok(TagRunResult {
            arn: arn.raw.clone(),
            resource_label: self.label().to_string(),
            desired_tags: desired_map,
            existing_tags: existing,
            final_tags,
            applied_tags: None,
        })
    }
}

/// Ordered adapter collection.
///
/// ARN dispatch takes the first adapter that declares support, so
/// registration order is part of the dispatch contract.
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn ResourceAdapter>>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Registry with every built-in adapter, in dispatch order.
    pub fn built_in() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(S3BucketAdapter));
        registry.register(Box::new(LambdaFunctionAdapter));
        registry.register(Box::new(Ec2InstanceAdapter));
        registry.register(Box::new(DynamoDbTableAdapter));
        registry.register(Box::new(IamRoleAdapter));
        registry.register(Box::new(SecretsManagerSecretAdapter));
        registry.register(Box::new(StepFunctionsStateMachineAdapter));
        registry.register(Box::new(CloudWatchLogGroupAdapter));
        registry.register(Box::new(EcrRepositoryAdapter));
        registry.register(Box::new(EcsTaskDefinitionAdapter));
        registry
    }

    pub fn register(&mut self, adapter: Box<dyn ResourceAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn adapters(&self) -> impl Iterator<Item = &dyn ResourceAdapter> {
        self.adapters.iter().map(|adapter| adapter.as_ref())
    }

    /// First adapter, in registration order, that supports the ARN.
    pub fn resolve_by_arn(&self, arn: &Arn) -> Result<&dyn ResourceAdapter> {
        self.adapters()
            .find(|adapter| adapter.supports(arn))
            .ok_or_else(|| Error::NoAdapterForArn(arn.raw.clone()))
    }

    /// First adapter matching the service, and the resource type when one is
    /// requested. Both comparisons ignore case.
    pub fn resolve_by_service(
        &self,
        service: &str,
        resource_type: Option<&str>,
    ) -> Result<&dyn ResourceAdapter> {
        self.adapters()
            .find(|adapter| {
                if !adapter.service().eq_ignore_ascii_case(service) {
                    return false;
                }
                match resource_type {
                    Some(requested) => adapter
                        .resource_type()
                        .is_some_and(|own| own.eq_ignore_ascii_case(requested)),
                    None => true,
                }
            })
            .ok_or_else(|| Error::NoAdapterForService {
                service: service.to_string(),
                resource_type: resource_type.map(str::to_string),
            })
    }
}

lazy_static! {
    static ref REGISTRY: AdapterRegistry = AdapterRegistry::built_in();
}

/// The process-wide adapter registry, built once on first use and read-only
/// afterwards.
pub fn registry() -> &'static AdapterRegistry {
    &REGISTRY
}

// Tag shape translation helpers shared by the adapters. The provider speaks
// three shapes: lists of {"Key", "Value"} objects, lists of lower-case
// {"key", "value"} objects, and plain string maps.

pub(crate) fn tags_from_upper_list(value: Option<&Value>) -> HashMap<String, String> {
    tags_from_list(value, "Key", "Value")
}

pub(crate) fn tags_from_lower_list(value: Option<&Value>) -> HashMap<String, String> {
    tags_from_list(value, "key", "value")
}

fn tags_from_list(value: Option<&Value>, key_field: &str, value_field: &str) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    let entries = match value.and_then(Value::as_array) {
        Some(entries) => entries,
        None => return tags,
    };
    for entry in entries {
        let key = entry.get(key_field).and_then(Value::as_str);
        let value = entry.get(value_field).and_then(Value::as_str);
        if let (Some(key), Some(value)) = (key, value) {
            tags.insert(key.to_string(), value.to_string());
        }
    }
    tags
}

pub(crate) fn tags_from_object(value: Option<&Value>) -> HashMap<String, String> {
    let mut tags = HashMap::new();
    let entries = match value.and_then(Value::as_object) {
        Some(entries) => entries,
        None => return tags,
    };
    for (key, value) in entries {
        if let Some(value) = value.as_str() {
            tags.insert(key.clone(), value.to_string());
        }
    }
    tags
}

pub(crate) fn upper_list_payload(tags: &TagSet) -> Value {
    Value::Array(
        tags.iter()
            .map(|tag| json!({"Key": tag.key, "Value": tag.value}))
            .collect(),
    )
}

pub(crate) fn lower_list_payload(tags: &TagSet) -> Value {
    Value::Array(
        tags.iter()
            .map(|tag| json!({"key": tag.key, "value": tag.value}))
            .collect(),
    )
}

pub(crate) fn object_payload(tags: &TagSet) -> Value {
    Value::Object(
        tags.iter()
            .map(|tag| (tag.key.clone(), Value::String(tag.value.clone())))
            .collect(),
    )
}
