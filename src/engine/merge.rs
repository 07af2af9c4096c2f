use std::collections::HashMap;

/// Reconcile the rendered tags with the tags already on the resource.
///
/// The result always covers the union of both key sets. On a key both sides
/// define, the existing value wins unless `override_existing` is set. Pure
/// function: callers decide what to do with the outcome.
pub fn merge_tags(
    desired: &HashMap<String, String>,
    existing: &HashMap<String, String>,
    override_existing: bool,
) -> HashMap<String, String> {
    let (base, winner) = if override_existing {
        (existing, desired)
    } else {
        (desired, existing)
    };

    let mut merged = base.clone();
    for (key, value) in winner {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
