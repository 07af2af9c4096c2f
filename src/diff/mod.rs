//! Tag diff classification and rendering.
//!
//! The classifier turns a (desired, existing, final) triple into one verdict
//! per key; the renderer formats those verdicts for the terminal. Both are
//! read-only over the reconciliation results they receive.

mod classifier;
mod renderer;

pub use classifier::{classify, ClassifiedTag, ConflictResolution, TagChangeKind};
pub use renderer::{render_applied, render_dry_run};
