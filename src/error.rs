//! Error taxonomy shared by the whole crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid ARN '{0}': expected at least six colon-separated segments starting with 'arn'")]
    InvalidArn(String),

    #[error("failed to load tag template from {path}: {reason}")]
    TemplateLoad { path: String, reason: String },

    #[error("failed to render dynamic tag '{key}': {reason}")]
    UndefinedContextVariable { key: String, reason: String },

    #[error("no adapter supports ARN '{0}'")]
    NoAdapterForArn(String),

    #[error("no adapter registered for service '{service}'{}", subtype_clause(.resource_type))]
    NoAdapterForService {
        service: String,
        resource_type: Option<String>,
    },

    #[error("adapter '{adapter}' does not support {operation}")]
    UnsupportedOperation { adapter: String, operation: String },

    #[error("could not resolve AWS identity: {0}")]
    Identity(String),

    #[error("aws {service} {operation} failed: {message}")]
    AwsCli {
        service: String,
        operation: String,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn subtype_clause(resource_type: &Option<String>) -> String {
    match resource_type {
        Some(subtype) => format!(" and resource type '{subtype}'"),
        None => String::new(),
    }
}
