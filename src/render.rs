//! Markdown rendering for generated views.
//!
//! Templates are plain function values: `(dimension, value, ordered records)
//! -> text`. The default tabular template is pure in the records and takes
//! its generation date from an injected clock, so rendered output is fully
//! deterministic under test.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::constants::fields::{FIELD_ENTITY_TYPE, FIELD_INDUSTRY, FIELD_STATUS};
use crate::record::Record;

/// Pluggable view template: `(dimension name, value, ordered records) -> text`.
pub type TemplateFn = Arc<dyn Fn(&str, &str, &[Record]) -> String + Send + Sync>;

/// Injected clock returning the current date.
pub type TodayFn = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Clock reading the system date (UTC).
pub fn system_today() -> TodayFn {
    Arc::new(|| Utc::now().date_naive())
}

/// Clock pinned to a fixed date, for deterministic rendering.
pub fn fixed_today(date: NaiveDate) -> TodayFn {
    Arc::new(move || date)
}

/// Default tabular markdown template.
///
/// Produces a title line, the generation date from `today`, a record count,
/// one table row per record (display name, entity-type label, and a joined
/// list of descriptive attributes when present), and a trailing stamp
/// repeating the (dimension, value) pair.
pub fn tabular_template(today: TodayFn) -> TemplateFn {
    Arc::new(move |dimension, value, records| {
        let mut lines = vec![
            format!("# {} {}", title_case(value), title_case(dimension)),
            String::new(),
            format!("**Last Updated:** {}", today().format("%Y-%m-%d")),
            format!("**Count:** {}", records.len()),
            String::new(),
            "---".to_string(),
            String::new(),
            "| Name | Type | Details |".to_string(),
            "|------|------|---------|".to_string(),
        ];

        for record in records {
            let name = match record.display_name() {
                "" => "Unknown",
                name => name,
            };
            let entity_type = record.get_str(FIELD_ENTITY_TYPE).unwrap_or("entity");
            let details: Vec<&str> = [FIELD_INDUSTRY, FIELD_STATUS]
                .into_iter()
                .filter_map(|field| record.get_str(field))
                .filter(|text| !text.is_empty())
                .collect();
            let details = if details.is_empty() {
                "-".to_string()
            } else {
                details.join(", ")
            };
            lines.push(format!("| **{name}** | {entity_type} | {details} |"));
        }

        lines.extend([
            String::new(),
            "---".to_string(),
            String::new(),
            format!("*Generated view for {dimension}={value}*"),
        ]);

        lines.join("\n")
    })
}

/// Ready-made normalizer: lowercase with whitespace runs collapsed to `_`.
///
/// Turns `Medical Devices` into `medical_devices`.
pub fn lower_snake(raw: &str) -> String {
    let mut normalized = String::new();
    let mut pending_separator = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            pending_separator = !normalized.is_empty();
        } else {
            if pending_separator {
                normalized.push('_');
                pending_separator = false;
            }
            normalized.extend(ch.to_lowercase());
        }
    }
    normalized
}

/// Capitalize the first character of each alphanumeric run.
///
/// Separators include `_`, so canonical values like `medical_devices` render
/// as `Medical_Devices` in headings.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_boundary = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if at_boundary {
                result.extend(ch.to_uppercase());
            } else {
                result.push(ch);
            }
            at_boundary = false;
        } else {
            result.push(ch);
            at_boundary = true;
        }
    }
    result
}
