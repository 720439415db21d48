#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// View configuration types.
pub mod config;
/// Centralized constants for store and view layout.
pub mod constants;
/// Dimension definitions and normalizer types.
pub mod dimension;
/// Attribute extraction and match testing.
pub mod extract;
/// Regeneration engine and the view generator contract.
pub mod generator;
/// Record representation shared by scanners, matchers, and templates.
pub mod record;
/// Markdown rendering templates and clock helpers.
pub mod render;
/// Read-only record store scanning.
pub mod scan;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::ViewConfig;
pub use dimension::{DimensionSpec, Normalizer};
pub use errors::ViewError;
pub use generator::{DimensionalViewGenerator, ViewGenerator};
pub use record::Record;
pub use render::{
    fixed_today, lower_snake, system_today, tabular_template, TemplateFn, TodayFn,
};
pub use scan::RecordScanner;
pub use types::{CanonicalValue, DimensionName, EntityType, StorePath};
