use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Compliance verdict for one scanned resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Compliant,
    NonCompliant,
}

/// Per-resource line of a compliance scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResourceReport {
    pub name: String,
    pub arn: String,
    pub adapter: String,
    pub status: ScanStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ScanSummary {
    pub total_resources: usize,
    pub compliant: usize,
    pub non_compliant: usize,
}

/// Aggregated result of scanning every resource of one kind.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub checked_at: String,
    pub summary: ScanSummary,
    pub resources: Vec<ScanResourceReport>,
}

impl ScanReport {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
