//! Reconciliation engines behind the CLI commands.

pub mod merge;
pub mod scan;
pub mod tag_run;
