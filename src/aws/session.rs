use std::sync::Arc;

use serde_json::Value;

use crate::aws::command::{CommandExecutor, RealCommandExecutor};
use crate::error::{Error, Result};

/// Provider connection settings for one invocation.
///
/// Constructed once per command and passed by shared reference to every
/// adapter call. Adapters never mutate it; all per-call state lives in the
/// arguments they pass to `api_call`.
pub struct AwsSession {
    profile: Option<String>,
    region: Option<String>,
    executor: Arc<dyn CommandExecutor>,
}

impl AwsSession {
    pub fn new(profile: Option<String>, region: Option<String>) -> Self {
        Self::with_executor(profile, region, Arc::new(RealCommandExecutor::new()))
    }

    pub fn with_executor(
        profile: Option<String>,
        region: Option<String>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            profile,
            region,
            executor,
        }
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Run one `aws` CLI operation and parse its JSON response.
    ///
    /// The session's profile and region are appended when set, so adapters
    /// only supply operation-specific arguments. Operations that print
    /// nothing on success yield `Value::Null`.
    pub fn api_call(&self, service: &str, operation: &str, args: &[&str]) -> Result<Value> {
        let mut argv: Vec<&str> = vec![service, operation];
        argv.extend_from_slice(args);
        argv.extend(["--output", "json"]);
        if let Some(profile) = self.profile.as_deref() {
            argv.extend(["--profile", profile]);
        }
        if let Some(region) = self.region.as_deref() {
            argv.extend(["--region", region]);
        }

        let failure = |message: String| Error::AwsCli {
            service: service.to_string(),
            operation: operation.to_string(),
            message,
        };

        let output = self
            .executor
            .execute("aws", &argv)
            .map_err(|e| failure(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(failure(stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let body = stdout.trim();
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(body)?)
    }
}
