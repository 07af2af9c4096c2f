//! Amazon Resource Name parsing.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// A parsed ARN.
///
/// Only the overall shape is validated. The resource segment is kept opaque
/// because every service encodes its own structure in there, including extra
/// colons; interpreting it is the adapters' job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arn {
    /// The identifier exactly as the caller provided it.
    pub raw: String,
    pub partition: String,
    pub service: String,
    pub region: Option<String>,
    pub account: Option<String>,
    pub resource: String,
}

impl Arn {
    /// Parse an ARN of the form `arn:partition:service:region:account:resource`.
    ///
    /// Empty region and account segments (global services such as S3 and IAM)
    /// normalize to `None`. Anything after the fifth colon stays inside
    /// `resource` untouched.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.splitn(6, ':').collect();
        if parts.len() < 6 || parts[0] != "arn" {
            return Err(Error::InvalidArn(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            partition: parts[1].to_string(),
            service: parts[2].to_string(),
            region: non_empty(parts[3]),
            account: non_empty(parts[4]),
            resource: parts[5].to_string(),
        })
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn non_empty(segment: &str) -> Option<String> {
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_arn() {
        let arn = Arn::parse("arn:aws:lambda:us-east-1:123456789012:function:billing").unwrap();

        assert_eq!(arn.partition, "aws");
        assert_eq!(arn.service, "lambda");
        assert_eq!(arn.region, Some("us-east-1".to_string()));
        assert_eq!(arn.account, Some("123456789012".to_string()));
        assert_eq!(arn.resource, "function:billing");
    }

    #[test]
    fn test_parse_global_arn_normalizes_empty_segments() {
        let arn = Arn::parse("arn:aws:s3:::my-bucket").unwrap();

        assert_eq!(arn.service, "s3");
        assert_eq!(arn.region, None);
        assert_eq!(arn.account, None);
        assert_eq!(arn.resource, "my-bucket");
    }

    #[test]
    fn test_parse_keeps_colons_inside_resource() {
        let arn = Arn::parse(
            "arn:aws:states:eu-west-1:123456789012:stateMachine:orders:prod",
        )
        .unwrap();

        assert_eq!(arn.resource, "stateMachine:orders:prod");
    }

    #[test]
    fn test_parse_rejects_too_few_segments() {
        let result = Arn::parse("arn:aws:s3:bucket");
        assert!(matches!(result, Err(Error::InvalidArn(_))));
    }

    #[test]
    fn test_parse_rejects_wrong_scheme() {
        let result = Arn::parse("urn:aws:s3:::my-bucket");
        assert!(matches!(result, Err(Error::InvalidArn(_))));
    }

    #[test]
    fn test_parse_rejects_empty_string() {
        assert!(Arn::parse("").is_err());
    }

    #[test]
    fn test_display_is_raw_form() {
        let raw = "arn:aws:iam::123456789012:role/deploy";
        let arn = Arn::parse(raw).unwrap();
        assert_eq!(arn.to_string(), raw);
    }
}
