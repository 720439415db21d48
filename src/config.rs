use std::fmt;

use crate::constants::store::DEFAULT_META_FILENAME;
use crate::constants::views::{DEFAULT_DOC_EXTENSION, DEFAULT_VIEWS_SUBDIR};
use crate::render::{system_today, TemplateFn, TodayFn};

/// Configuration for view generation.
///
/// Dimension definitions and source-location maps are constructor arguments
/// of the generator; this struct carries the remaining knobs.
#[derive(Clone)]
pub struct ViewConfig {
    /// Subdirectory under the store root holding generated views.
    pub views_subdir: String,
    /// Metadata filename read inside each record directory.
    pub meta_filename: String,
    /// File extension for generated documents.
    pub doc_extension: String,
    /// Template override; `None` selects the default tabular template.
    pub template: Option<TemplateFn>,
    /// Clock used by the default template's generation date.
    pub today: TodayFn,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            views_subdir: DEFAULT_VIEWS_SUBDIR.to_string(),
            meta_filename: DEFAULT_META_FILENAME.to_string(),
            doc_extension: DEFAULT_DOC_EXTENSION.to_string(),
            template: None,
            today: system_today(),
        }
    }
}

impl fmt::Debug for ViewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewConfig")
            .field("views_subdir", &self.views_subdir)
            .field("meta_filename", &self.meta_filename)
            .field("doc_extension", &self.doc_extension)
            .field("template", &self.template.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
