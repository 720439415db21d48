use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::constants::dimensions::UNKNOWN_VALUE_RANK;
use crate::constants::views::SUBDIR_PREFIX;
use crate::types::{CanonicalValue, DimensionName};

/// Shared value-normalization function applied before membership tests.
///
/// Must be pure: the same input always yields the same output.
pub type Normalizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Static description of one categorical axis.
///
/// A dimension names the record attribute to read (possibly a dotted nested
/// path), the finite set of canonical values it groups by, and how records
/// inside one view are ordered.
#[derive(Clone)]
pub struct DimensionSpec {
    /// Unique dimension name (e.g. `tier`, `industry`).
    pub name: DimensionName,
    /// Declared canonical values in presentation order; no duplicates.
    pub values: Vec<CanonicalValue>,
    /// Attribute path read from records; `None` means the dimension name.
    pub field: Option<String>,
    /// View subdirectory override; `None` means `by_<name>`.
    pub subdir: Option<String>,
    /// Optional normalizer applied to raw values before membership tests.
    pub normalizer: Option<Normalizer>,
    /// Optional explicit value ranks overriding declaration order.
    pub sort_order: Option<HashMap<CanonicalValue, usize>>,
}

impl DimensionSpec {
    /// Create a dimension with a name and its declared values.
    pub fn new(
        name: impl Into<DimensionName>,
        values: impl IntoIterator<Item = impl Into<CanonicalValue>>,
    ) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            field: None,
            subdir: None,
            normalizer: None,
            sort_order: None,
        }
    }

    /// Read the dimension from a custom attribute path (dotted paths allowed).
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Write views under a custom subdirectory instead of `by_<name>`.
    pub fn with_subdir(mut self, subdir: impl Into<String>) -> Self {
        self.subdir = Some(subdir.into());
        self
    }

    /// Normalize raw values with `normalizer` before membership tests.
    pub fn with_normalizer(
        mut self,
        normalizer: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    /// Rank values explicitly instead of by declaration order.
    pub fn with_sort_order(mut self, sort_order: HashMap<CanonicalValue, usize>) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Attribute path read from records for this dimension.
    pub fn field_path(&self) -> &str {
        self.field.as_deref().unwrap_or(&self.name)
    }

    /// View subdirectory for this dimension.
    pub fn subdir(&self) -> String {
        self.subdir
            .clone()
            .unwrap_or_else(|| format!("{SUBDIR_PREFIX}{}", self.name))
    }

    /// Normalize a raw attribute value.
    ///
    /// Empty input stays empty; without a configured normalizer this is the
    /// identity function.
    pub fn normalize(&self, raw: &str) -> CanonicalValue {
        if raw.is_empty() {
            return String::new();
        }
        match &self.normalizer {
            Some(normalizer) => normalizer(raw),
            None => raw.to_string(),
        }
    }

    /// True when `value` is one of this dimension's declared values.
    pub fn declares(&self, value: &str) -> bool {
        self.values.iter().any(|declared| declared == value)
    }

    /// Deterministic rank for a canonical value.
    ///
    /// Explicit `sort_order` wins, then position in `values`; values found in
    /// neither get the unknown sentinel rank so they sort to the end.
    pub fn sort_key(&self, value: &str) -> usize {
        if let Some(order) = &self.sort_order {
            return order.get(value).copied().unwrap_or(UNKNOWN_VALUE_RANK);
        }
        self.values
            .iter()
            .position(|declared| declared == value)
            .unwrap_or(UNKNOWN_VALUE_RANK)
    }
}

impl fmt::Debug for DimensionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionSpec")
            .field("name", &self.name)
            .field("values", &self.values)
            .field("field", &self.field)
            .field("subdir", &self.subdir)
            .field("normalizer", &self.normalizer.as_ref().map(|_| "<fn>"))
            .field("sort_order", &self.sort_order)
            .finish()
    }
}
