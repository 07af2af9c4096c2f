//! Terminal rendering of reconciliation results.
//!
//! Builds styled strings rather than printing, so commands stay in charge of
//! where output goes.

use std::collections::HashMap;

use owo_colors::OwoColorize;

use crate::diff::classifier::{classify, ClassifiedTag, ConflictResolution, TagChangeKind};
use crate::model::TagRunResult;

/// Render the dry-run report for one resource: header, tag listings for each
/// side, then the classified final state with a legend and closing notice.
pub fn render_dry_run(result: &TagRunResult, override_existing: bool) -> String {
    let mut output = String::new();

    // Brighter grey: RGB(160, 160, 160)
    let rule = "─".repeat(50).truecolor(160, 160, 160).to_string();

    output.push('\n');
    // Pastel cream/yellow: RGB(255, 230, 160)
    output.push_str(&format!(
        "{}\n",
        "DRY RUN: no changes will be applied"
            .truecolor(255, 230, 160)
            .bold()
    ));
    output.push_str(&format!("{rule}\n"));
    output.push_str(&header_line("Resource", &result.resource_label));
    output.push_str(&header_line("ARN", &result.arn));
    let mode = if override_existing {
        "override (template values replace existing tags)"
    } else {
        "safe (existing tags win on conflicts)"
    };
    output.push_str(&header_line("Mode", mode));
    output.push_str(&format!("{rule}\n"));

    output.push_str(&tag_section(
        "Desired Tags (from template/context):",
        &result.desired_tags,
    ));
    output.push_str(&tag_section(
        "Existing Tags (currently on resource):",
        &result.existing_tags,
    ));

    // Pastel lavender: RGB(181, 174, 254)
    output.push_str(&format!(
        "{}\n",
        "Proposed Tags (final state if applied):"
            .truecolor(181, 174, 254)
            .bold()
    ));

    let classified = classify(
        &result.desired_tags,
        &result.existing_tags,
        &result.final_tags,
        override_existing,
    );

    if classified.is_empty() {
        output.push_str(&format!("  {}\n", "(no tags)".truecolor(160, 160, 160)));
    } else {
        let key_width = classified
            .iter()
            .map(|tag| tag.key.chars().count())
            .max()
            .unwrap_or(0);
        for tag in &classified {
            output.push_str(&render_classified_line(tag, key_width));
        }
    }

    output.push_str(&format!("{rule}\n"));
    output.push_str(&legend());
    // Pastel cream/yellow: RGB(255, 230, 160)
    output.push_str(&format!(
        "{}\n",
        "DRY RUN ONLY: no changes were applied"
            .truecolor(255, 230, 160)
            .bold()
    ));
    output
}

/// Render the confirmation block printed after a real write.
pub fn render_applied(result: &TagRunResult) -> String {
    let mut output = String::new();

    output.push('\n');
    // Pastel mint green: RGB(152, 225, 152)
    output.push_str(&format!(
        "{} {} {}\n",
        "✓".truecolor(152, 225, 152).bold(),
        result.resource_label.bright_white().bold(),
        result.arn.truecolor(160, 160, 160)
    ));

    let applied = match &result.applied_tags {
        Some(applied) => applied,
        None => return output,
    };

    let mut keys: Vec<&String> = applied.keys().collect();
    keys.sort_by_key(|key| key.to_lowercase());
    for key in keys {
        output.push_str(&format!(
            "    {} {}\n",
            format!("{key}:").truecolor(160, 160, 160),
            applied[key].bright_white()
        ));
    }

    let expected = result.final_tags.len();
    if applied.len() < expected {
        // Pastel cream/yellow: RGB(255, 230, 160)
        output.push_str(&format!(
            "    {}\n",
            format!(
                "⚠ resource reports {} of {} tags so far; reads are eventually consistent",
                applied.len(),
                expected
            )
            .truecolor(255, 230, 160)
        ));
    }

    output
}

fn header_line(key: &str, value: &str) -> String {
    format!(
        "  {} {}\n",
        format!("{key}:").truecolor(160, 160, 160),
        value.bright_white()
    )
}

/// One titled tag listing. Keys sort case-insensitively; an empty map renders
/// a grey placeholder.
fn tag_section(title: &str, tags: &HashMap<String, String>) -> String {
    let mut output = String::new();
    // Pastel lavender: RGB(181, 174, 254)
    output.push_str(&format!("{}\n", title.truecolor(181, 174, 254).bold()));

    if tags.is_empty() {
        output.push_str(&format!("  {}\n", "(none)".truecolor(160, 160, 160)));
        return output;
    }

    let mut keys: Vec<&String> = tags.keys().collect();
    keys.sort_by_key(|key| key.to_lowercase());
    for key in keys {
        output.push_str(&format!(
            "  {} {}\n",
            format!("{key}:").truecolor(160, 160, 160),
            tags[key].bright_white()
        ));
    }

    output
}

fn render_classified_line(tag: &ClassifiedTag, key_width: usize) -> String {
    let (r, g, b) = tag.kind.color();
    let marker = format!("[{}]", tag.kind.symbol());
    let padded_key = format!("{:<key_width$}", tag.key);

    let value = match (&tag.kind, &tag.conflict_value) {
        (TagChangeKind::Changed(ConflictResolution::Overwritten), Some(previous)) => {
            format!("{} (was {})", tag.value, previous)
        }
        (TagChangeKind::Changed(ConflictResolution::Kept), Some(declined)) => {
            format!("{} (declined {})", tag.value, declined)
        }
        _ => tag.value.clone(),
    };

    format!(
        "  {} {}  {}\n",
        marker.truecolor(r, g, b).bold(),
        padded_key.truecolor(r, g, b),
        value.bright_white()
    )
}

fn legend() -> String {
    let entries = [
        TagChangeKind::Added,
        TagChangeKind::LegacyPreserved,
        TagChangeKind::Unchanged,
        TagChangeKind::Changed(ConflictResolution::Overwritten),
    ];
    let rendered: Vec<String> = entries
        .iter()
        .map(|kind| {
            let (r, g, b) = kind.color();
            let label = match kind {
                TagChangeKind::Changed(_) => "changed",
                other => other.label(),
            };
            format!(
                "{} {}",
                format!("[{}]", kind.symbol()).truecolor(r, g, b),
                label.truecolor(160, 160, 160)
            )
        })
        .collect();
    format!("  {}\n", rendered.join("   "))
}
