//! Attribute extraction and match testing.
//!
//! Extraction returns an explicit `None` instead of raising when a path does
//! not resolve, so the skip-on-missing policy lives in the return contract.
//! Nothing here mutates records.

use serde_json::Value;

use crate::dimension::DimensionSpec;
use crate::record::Record;

/// Walk `record` along a dot-separated attribute path.
///
/// `tier` is a direct lookup; `attributes.tier` descends into nested JSON
/// objects one segment at a time. Any missing key, or an intermediate value
/// that is not an object when further descent is required, yields `None`.
pub fn extract<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Render a JSON leaf as matchable text.
///
/// Strings pass through and numbers render via `to_string()`; booleans,
/// arrays, objects, and null are treated as absent.
pub fn raw_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// True when the record's attribute for `dimension`, once normalized, equals
/// `target` exactly.
///
/// `target` is assumed already canonical. Missing and empty raw values never
/// match.
pub fn matches(record: &Record, dimension: &DimensionSpec, target: &str) -> bool {
    let Some(raw) = extract(record, dimension.field_path()).and_then(raw_text) else {
        return false;
    };
    if raw.is_empty() {
        return false;
    }
    dimension.normalize(&raw) == target
}
