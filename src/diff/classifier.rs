//! Classification of a reconciled tag set for dry-run reporting.

use std::collections::HashMap;

/// Which side of a conflict ended up in the final tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// Override mode: the template value replaces the existing one.
    Overwritten,
    /// Safe mode: the existing value stays, the template value is declined.
    Kept,
}

/// Represents how one key of the final tag set relates to the resource's
/// current tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagChangeKind {
    /// Key is not on the resource yet.
    Added,
    /// Key exists only on the resource; the template does not manage it.
    LegacyPreserved,
    /// Key exists on both sides with the same value.
    Unchanged,
    /// Key exists on both sides with different values.
    Changed(ConflictResolution),
}

impl TagChangeKind {
    /// Get the symbol used to mark this change kind
    pub fn symbol(&self) -> &'static str {
        match self {
            TagChangeKind::Added => "+",
            TagChangeKind::LegacyPreserved => "•",
            TagChangeKind::Unchanged => "=",
            TagChangeKind::Changed(_) => "!",
        }
    }

    /// Get the label for this change kind
    pub fn label(&self) -> &'static str {
        match self {
            TagChangeKind::Added => "added",
            TagChangeKind::LegacyPreserved => "preserved legacy",
            TagChangeKind::Unchanged => "unchanged",
            TagChangeKind::Changed(ConflictResolution::Overwritten) => "overwritten",
            TagChangeKind::Changed(ConflictResolution::Kept) => "kept",
        }
    }

    /// Get RGB color tuple for this change kind
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            TagChangeKind::Added => (152, 225, 152), // Pastel mint green
            TagChangeKind::LegacyPreserved => (160, 200, 255), // Pastel sky blue
            TagChangeKind::Unchanged => (160, 160, 160), // Grey
            TagChangeKind::Changed(ConflictResolution::Overwritten) => (181, 174, 254), // Pastel lavender
            TagChangeKind::Changed(ConflictResolution::Kept) => (255, 230, 160), // Pastel cream/yellow
        }
    }
}

/// One classified key of the final tag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTag {
    pub key: String,
    pub kind: TagChangeKind,
    /// The value present in the final set.
    pub value: String,
    /// The value that lost the conflict, when there was one.
    pub conflict_value: Option<String>,
}

/// Classify every key of the final tag set against the desired and existing
/// sides.
///
/// Each key gets exactly one kind, decided in priority order: added when the
/// resource does not have it, preserved-legacy when only the resource has it,
/// unchanged when both sides agree, changed otherwise. The output is sorted
/// case-insensitively by key. Classification never mutates its inputs, so
/// running it twice over the same triple yields the same result.
pub fn classify(
    desired: &HashMap<String, String>,
    existing: &HashMap<String, String>,
    final_tags: &HashMap<String, String>,
    override_existing: bool,
) -> Vec<ClassifiedTag> {
    let mut keys: Vec<&String> = final_tags.keys().collect();
    keys.sort_by_key(|key| key.to_lowercase());

    keys.into_iter()
        .map(|key| {
            let value = final_tags[key].clone();
            let (kind, conflict_value) = match (desired.get(key), existing.get(key)) {
                (_, None) => (TagChangeKind::Added, None),
                (None, Some(_)) => (TagChangeKind::LegacyPreserved, None),
                (Some(desired_value), Some(existing_value))
                    if desired_value == existing_value =>
                {
                    (TagChangeKind::Unchanged, None)
                }
                (Some(desired_value), Some(existing_value)) => {
                    if override_existing {
                        (
                            TagChangeKind::Changed(ConflictResolution::Overwritten),
                            Some(existing_value.clone()),
                        )
                    } else {
                        (
                            TagChangeKind::Changed(ConflictResolution::Kept),
                            Some(desired_value.clone()),
                        )
                    }
                }
            };

            ClassifiedTag {
                key: key.clone(),
                kind,
                value,
                conflict_value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::merge::merge_tags;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn kind_of<'a>(classified: &'a [ClassifiedTag], key: &str) -> &'a ClassifiedTag {
        classified
            .iter()
            .find(|tag| tag.key == key)
            .unwrap_or_else(|| panic!("key {key} not classified"))
    }

    #[test]
    fn test_safe_mode_classification() {
        let desired = map(&[("A", "1"), ("B", "2")]);
        let existing = map(&[("B", "3"), ("C", "4")]);
        let final_tags = merge_tags(&desired, &existing, false);

        let classified = classify(&desired, &existing, &final_tags, false);

        assert_eq!(classified.len(), 3);
        assert_eq!(kind_of(&classified, "A").kind, TagChangeKind::Added);
        let b = kind_of(&classified, "B");
        assert_eq!(b.kind, TagChangeKind::Changed(ConflictResolution::Kept));
        assert_eq!(b.value, "3");
        assert_eq!(b.conflict_value, Some("2".to_string()));
        assert_eq!(
            kind_of(&classified, "C").kind,
            TagChangeKind::LegacyPreserved
        );
    }

    #[test]
    fn test_override_mode_classification() {
        let desired = map(&[("A", "1"), ("B", "2")]);
        let existing = map(&[("B", "3"), ("C", "4")]);
        let final_tags = merge_tags(&desired, &existing, true);

        let classified = classify(&desired, &existing, &final_tags, true);

        let b = kind_of(&classified, "B");
        assert_eq!(
            b.kind,
            TagChangeKind::Changed(ConflictResolution::Overwritten)
        );
        assert_eq!(b.value, "2");
        assert_eq!(b.conflict_value, Some("3".to_string()));
    }

    #[test]
    fn test_unchanged_when_both_sides_agree() {
        let desired = map(&[("Owner", "platform")]);
        let existing = map(&[("Owner", "platform")]);
        let final_tags = merge_tags(&desired, &existing, false);

        let classified = classify(&desired, &existing, &final_tags, false);

        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].kind, TagChangeKind::Unchanged);
        assert_eq!(classified[0].conflict_value, None);
    }

    #[test]
    fn test_every_final_key_is_classified_exactly_once() {
        let desired = map(&[("A", "1"), ("B", "2"), ("D", "5")]);
        let existing = map(&[("B", "2"), ("C", "4"), ("D", "9")]);
        let final_tags = merge_tags(&desired, &existing, false);

        let classified = classify(&desired, &existing, &final_tags, false);

        assert_eq!(classified.len(), final_tags.len());
        let mut keys: Vec<&str> = classified.iter().map(|tag| tag.key.as_str()).collect();
        keys.dedup();
        assert_eq!(keys.len(), classified.len());
    }

    #[test]
    fn test_output_is_sorted_case_insensitively() {
        let desired = map(&[("beta", "1"), ("Alpha", "2"), ("GAMMA", "3")]);
        let final_tags = merge_tags(&desired, &HashMap::new(), false);

        let classified = classify(&desired, &HashMap::new(), &final_tags, false);

        let keys: Vec<&str> = classified.iter().map(|tag| tag.key.as_str()).collect();
        assert_eq!(keys, vec!["Alpha", "beta", "GAMMA"]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let desired = map(&[("A", "1"), ("B", "2")]);
        let existing = map(&[("B", "3")]);
        let final_tags = merge_tags(&desired, &existing, false);

        let first = classify(&desired, &existing, &final_tags, false);
        let second = classify(&desired, &existing, &final_tags, false);

        assert_eq!(first, second);
    }
}
