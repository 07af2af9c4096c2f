//! Core value types exchanged between the engines and the presentation layer.

pub mod identity;
pub mod run_result;
pub mod scan_report;
pub mod tag;

pub use identity::AwsIdentity;
pub use run_result::TagRunResult;
pub use scan_report::{ScanReport, ScanResourceReport, ScanStatus, ScanSummary};
pub use tag::{Tag, TagSet};
