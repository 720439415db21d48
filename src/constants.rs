/// Constants describing the record store layout.
pub mod store {
    /// Default metadata filename inside each record directory.
    pub const DEFAULT_META_FILENAME: &str = "_meta.json";
    /// Name prefix marking reserved entries that directory scans skip.
    pub const HIDDEN_PREFIX: &str = "_";
}

/// Constants describing the generated view layout.
pub mod views {
    /// Default subdirectory under the store root holding generated views.
    pub const DEFAULT_VIEWS_SUBDIR: &str = "views";
    /// Default file extension for generated documents.
    pub const DEFAULT_DOC_EXTENSION: &str = "md";
    /// Prefix used to derive a dimension's view subdirectory from its name.
    pub const SUBDIR_PREFIX: &str = "by_";
}

/// Synthetic and well-known record field names.
pub mod fields {
    /// Directory name of a directory-based record, stamped during scanning.
    pub const FIELD_DIR: &str = "_dir";
    /// Store-relative path of a directory-based record, stamped during scanning.
    pub const FIELD_PATH: &str = "_path";
    /// Entity-type label stamped onto matched records during regeneration.
    pub const FIELD_ENTITY_TYPE: &str = "_entity_type";
    /// Primary display-name attribute.
    pub const FIELD_NAME: &str = "name";
    /// Fallback display-name attribute.
    pub const FIELD_TOPIC: &str = "topic";
    /// Optional descriptive attribute shown in the default template.
    pub const FIELD_INDUSTRY: &str = "industry";
    /// Optional descriptive attribute shown in the default template.
    pub const FIELD_STATUS: &str = "status";
}

/// Constants used by dimension value ordering.
pub mod dimensions {
    /// Sort rank assigned to values absent from a dimension's declared list.
    /// Pushes unknown values to the end instead of erroring.
    pub const UNKNOWN_VALUE_RANK: usize = 999;
}
