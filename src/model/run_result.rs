use std::collections::HashMap;

use serde::Serialize;

/// Outcome of reconciling one resource against the rendered template.
///
/// `final_tags` is what reconciliation decided the resource should carry.
/// `applied_tags` is what the provider actually reported after a write; it
/// stays `None` on dry runs.
#[derive(Debug, Clone, Serialize)]
pub struct TagRunResult {
    pub arn: String,
    pub resource_label: String,
    pub desired_tags: HashMap<String, String>,
    pub existing_tags: HashMap<String, String>,
    pub final_tags: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_tags: Option<HashMap<String, String>>,
}
