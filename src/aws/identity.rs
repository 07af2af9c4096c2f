use serde_json::Value;

use crate::aws::session::AwsSession;
use crate::error::{Error, Result};
use crate::model::AwsIdentity;

/// Resolve the identity behind the session's credentials.
///
/// Commands call this before touching any resource so that broken
/// credentials surface as one clear error instead of a string of adapter
/// failures.
pub fn current_identity(session: &AwsSession) -> Result<AwsIdentity> {
    let response = session
        .api_call("sts", "get-caller-identity", &[])
        .map_err(|e| Error::Identity(e.to_string()))?;

    Ok(AwsIdentity {
        account: string_field(&response, "Account")?,
        arn: string_field(&response, "Arn")?,
        user_id: string_field(&response, "UserId")?,
        region: session.region().map(str::to_string),
        profile: session.profile().map(str::to_string),
    })
}

fn string_field(response: &Value, name: &str) -> Result<String> {
    response
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Identity(format!("missing '{name}' in caller identity response")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::command::{MockCommandExecutor, MockCommandResult};
    use std::sync::Arc;

    #[test]
    fn test_current_identity_parses_response() {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            MockCommandResult::ok(
                r#"{"UserId": "AIDAEXAMPLE", "Account": "123456789012", "Arn": "arn:aws:iam::123456789012:user/deployer"}"#,
            ),
        ]));
        let session =
            AwsSession::with_executor(Some("prod".to_string()), None, executor);

        let identity = current_identity(&session).unwrap();

        assert_eq!(identity.account, "123456789012");
        assert_eq!(identity.arn, "arn:aws:iam::123456789012:user/deployer");
        assert_eq!(identity.user_id, "AIDAEXAMPLE");
        assert_eq!(identity.profile, Some("prod".to_string()));
        assert_eq!(identity.region, None);
    }

    #[test]
    fn test_current_identity_failure_is_identity_error() {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            MockCommandResult::failed("Unable to locate credentials"),
        ]));
        let session = AwsSession::with_executor(None, None, executor);

        let result = current_identity(&session);

        match result {
            Err(Error::Identity(message)) => {
                assert!(message.contains("Unable to locate credentials"))
            }
            other => panic!("expected identity error, got {other:?}"),
        }
    }

    #[test]
    fn test_current_identity_missing_field() {
        let executor = Arc::new(MockCommandExecutor::with_results(vec![
            MockCommandResult::ok(r#"{"Account": "123456789012"}"#),
        ]));
        let session = AwsSession::with_executor(None, None, executor);

        assert!(matches!(
            current_identity(&session),
            Err(Error::Identity(_))
        ));
    }
}
