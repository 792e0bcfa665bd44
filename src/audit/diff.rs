//! Field diffs for audit entries
//!
//! Compares the top-level fields of two serialized entities and renders the
//! changes as `field: old -> new`, joined by commas.

use std::collections::BTreeSet;

use serde_json::Value;

/// Bookkeeping fields left out of diff summaries
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Longest string shown in full; longer ones are cut with `...`
const MAX_STRING_CHARS: usize = 50;

/// Summarize what changed between two serialized states
///
/// `None` when nothing outside [`IGNORED_FIELDS`] differs.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_fields), Value::Object(after_fields)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", render(before), render(after)));
    };

    let keys: BTreeSet<&String> = before_fields.keys().chain(after_fields.keys()).collect();

    let changes: Vec<String> = keys
        .into_iter()
        .filter(|key| !IGNORED_FIELDS.contains(&key.as_str()))
        .filter_map(|key| {
            let (old, new) = match (before_fields.get(key), after_fields.get(key)) {
                (Some(old), Some(new)) if old == new => return None,
                (Some(old), Some(new)) => (render(old), render(new)),
                (Some(old), None) => (render(old), "(removed)".to_string()),
                (None, Some(new)) => ("(added)".to_string(), render(new)),
                (None, None) => return None,
            };
            Some(format!("{}: {} -> {}", key, old, new))
        })
        .collect();

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_CHARS => {
            let cut: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
            format!("\"{}...\"", cut)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
