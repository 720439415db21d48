//! Regeneration engine and the view generator contract.
//!
//! Ownership model:
//! - `ViewGenerator` is the caller-facing contract: full rebuild plus
//!   incremental rebuild from a batch of changed records.
//! - `DimensionalViewGenerator` is the provided grouping: one view per
//!   (dimension, value) pair. Alternative groupings can implement the same
//!   two operations.
//!
//! Every view recompute re-scans the configured source locations from
//! scratch; only the choice of which views to recompute is incremental.
//! Calls are therefore idempotent and need no warm state between them.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::debug;

use crate::config::ViewConfig;
use crate::constants::fields::FIELD_ENTITY_TYPE;
use crate::dimension::DimensionSpec;
use crate::errors::ViewError;
use crate::extract::{extract, matches, raw_text};
use crate::record::Record;
use crate::render::{tabular_template, TemplateFn};
use crate::scan::RecordScanner;
use crate::types::{CanonicalValue, DimensionName, EntityType, StorePath};

/// Contract for view generators.
///
/// Incremental output must always be reproducible as a subset of what a full
/// rebuild would produce.
pub trait ViewGenerator {
    /// Rebuild every document for every declared value of every dimension.
    ///
    /// Returns the total number of documents written.
    fn regenerate_all(&self) -> Result<usize, ViewError>;

    /// Rebuild only the documents affected by `records`.
    ///
    /// `records` are post-change snapshots of the records that changed; the
    /// generator extracts each record's dimension attributes to find the
    /// affected (dimension, value) pairs and recomputes each exactly once.
    /// Returns the number of distinct documents recomputed.
    fn regenerate_affected(&self, records: &[Record]) -> Result<usize, ViewError>;
}

/// Generate one markdown view per (dimension, value) pair.
///
/// Example output layout under the store root:
///
/// ```text
/// views/
/// ├── by_tier/
/// │   ├── strategic.md
/// │   └── key.md
/// └── by_industry/
///     └── robotics.md
/// ```
pub struct DimensionalViewGenerator {
    views_path: PathBuf,
    doc_extension: String,
    dimensions: IndexMap<DimensionName, DimensionSpec>,
    entity_paths: IndexMap<EntityType, Vec<StorePath>>,
    log_paths: IndexMap<EntityType, StorePath>,
    scanner: RecordScanner,
    template: TemplateFn,
}

impl DimensionalViewGenerator {
    /// Create a generator over the store rooted at `root`.
    ///
    /// `entity_paths` binds each entity-type label to the directory-store
    /// locations to scan; `log_paths` binds labels to JSONL log files. Both
    /// are scanned in configured order during a view recompute. Dimensions
    /// with colliding output locations are a caller configuration error and
    /// are not validated here.
    pub fn new(
        root: impl Into<PathBuf>,
        dimensions: Vec<DimensionSpec>,
        entity_paths: IndexMap<EntityType, Vec<StorePath>>,
        log_paths: IndexMap<EntityType, StorePath>,
        config: ViewConfig,
    ) -> Self {
        let root = root.into();
        let views_path = root.join(&config.views_subdir);
        let scanner = RecordScanner::new(&root).with_meta_filename(&config.meta_filename);
        let template = config
            .template
            .unwrap_or_else(|| tabular_template(config.today));
        Self {
            views_path,
            doc_extension: config.doc_extension,
            dimensions: dimensions
                .into_iter()
                .map(|spec| (spec.name.clone(), spec))
                .collect(),
            entity_paths,
            log_paths,
            scanner,
            template,
        }
    }

    /// Rebuild every view of one dimension.
    ///
    /// Returns the number of documents written, or an error before any write
    /// when `dimension` is not configured.
    pub fn regenerate_dimension(&self, dimension: &str) -> Result<usize, ViewError> {
        let spec = self
            .dimensions
            .get(dimension)
            .ok_or_else(|| ViewError::UnknownDimension {
                dimension: dimension.to_string(),
            })?;
        for value in &spec.values {
            self.rebuild_view(spec, value)?;
        }
        Ok(spec.values.len())
    }

    /// Output location for one (dimension, value) pair.
    pub fn view_path(&self, spec: &DimensionSpec, value: &str) -> PathBuf {
        self.views_path
            .join(spec.subdir())
            .join(format!("{value}.{}", self.doc_extension))
    }

    /// Recompute and persist one view: re-scan every configured source
    /// location, filter against (dimension, value), sort, render, write.
    fn rebuild_view(&self, spec: &DimensionSpec, value: &str) -> Result<(), ViewError> {
        let matched = self.collect_matches(spec, value);
        debug!(
            dimension = %spec.name,
            value,
            records = matched.len(),
            "rebuilding view"
        );
        let content = (self.template)(&spec.name, value, &matched);
        self.write_view(&self.view_path(spec, value), &content)
    }

    /// All records matching (dimension, value), stamped with their
    /// entity-type label and deterministically ordered.
    fn collect_matches(&self, spec: &DimensionSpec, value: &str) -> Vec<Record> {
        let mut matched = Vec::new();
        for (entity_type, locations) in &self.entity_paths {
            for location in locations {
                for record in self.scanner.scan_directory(location) {
                    self.keep_if_matching(record, entity_type, spec, value, &mut matched);
                }
            }
        }
        for (entity_type, location) in &self.log_paths {
            for record in self.scanner.scan_log(location) {
                self.keep_if_matching(record, entity_type, spec, value, &mut matched);
            }
        }
        // Stable sort; scan order (configured location order, then
        // lexicographic directory order / log line order) breaks remaining
        // ties.
        matched.sort_by_key(|record| Self::record_sort_key(record, spec));
        matched
    }

    fn keep_if_matching(
        &self,
        mut record: Record,
        entity_type: &str,
        spec: &DimensionSpec,
        value: &str,
        matched: &mut Vec<Record>,
    ) {
        if matches(&record, spec, value) {
            record.insert(FIELD_ENTITY_TYPE, Value::String(entity_type.to_string()));
            matched.push(record);
        }
    }

    /// Ordering rule within one view: the record's own normalized value rank
    /// first (stability; always the target value for matched records), then
    /// the display name compared case-insensitively.
    fn record_sort_key(record: &Record, spec: &DimensionSpec) -> (usize, String) {
        let canonical = extract(record, spec.field_path())
            .and_then(raw_text)
            .map(|raw| spec.normalize(&raw))
            .unwrap_or_default();
        (
            spec.sort_key(&canonical),
            record.display_name().to_lowercase(),
        )
    }

    /// Persist one rendered document, creating intermediate directories.
    ///
    /// The file is overwritten in full; a failure surfaces immediately and
    /// documents already written by the same operation stay on disk.
    fn write_view(&self, path: &Path, content: &str) -> Result<(), ViewError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ViewError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ViewError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ViewGenerator for DimensionalViewGenerator {
    fn regenerate_all(&self) -> Result<usize, ViewError> {
        let mut written = 0;
        for spec in self.dimensions.values() {
            for value in &spec.values {
                self.rebuild_view(spec, value)?;
                written += 1;
            }
        }
        Ok(written)
    }

    fn regenerate_affected(&self, records: &[Record]) -> Result<usize, ViewError> {
        let mut affected: IndexSet<(DimensionName, CanonicalValue)> = IndexSet::new();
        for record in records {
            for spec in self.dimensions.values() {
                let Some(raw) = extract(record, spec.field_path()).and_then(raw_text) else {
                    continue;
                };
                if raw.is_empty() {
                    continue;
                }
                let canonical = spec.normalize(&raw);
                if spec.declares(&canonical) {
                    affected.insert((spec.name.clone(), canonical));
                }
            }
        }

        for (dimension, value) in &affected {
            // Collected pairs only name configured dimensions.
            let spec = &self.dimensions[dimension];
            self.rebuild_view(spec, value)?;
        }
        Ok(affected.len())
    }
}
