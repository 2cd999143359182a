//! Style merging
//!
//! Folds a [`StyleValue`] into a single [`StyleMap`]. Lists merge left to
//! right: later entries override earlier ones key by key, and nested style
//! maps found under the same key in several entries are merged recursively,
//! so `[{":hover": {a}}, {":hover": {b}}]` keeps both `a` and `b`.
//!
//! Entries that are not maps (`false`, null, empty text, nested lists) are
//! skipped.

use crate::style::{PropertyValue, StyleMap, StyleValue};

/// Flatten a style value into one map
///
/// A single map is returned as written. Scalars flatten to an empty map.
pub fn flatten(value: &StyleValue) -> StyleMap {
    match value {
        StyleValue::Map(map) => map.clone(),
        StyleValue::List(entries) => merge_styles(entries),
        _ => StyleMap::new(),
    }
}

/// Merge a sequence of style values left to right
pub fn merge_styles<'a, I>(entries: I) -> StyleMap
where
    I: IntoIterator<Item = &'a StyleValue>,
{
    let mut merged = StyleMap::new();
    for entry in entries {
        // Nested sequences are not expanded
        if let StyleValue::Map(map) = entry {
            merge_into(&mut merged, map);
        }
    }
    merged
}

/// Merge `source` on top of `target`, deep-merging nested maps
pub fn merge_into(target: &mut StyleMap, source: &StyleMap) {
    for (key, value) in source.iter() {
        let existing = target.get(key).and_then(PropertyValue::as_nested_map);
        let next = match (existing, value.as_nested_map()) {
            (Some(existing), Some(incoming)) => {
                let mut nested = existing.clone();
                merge_into(&mut nested, incoming);
                PropertyValue::from(nested)
            }
            _ => value.clone(),
        };
        target.insert(key, next);
    }
}
