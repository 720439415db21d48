use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::DimensionName;

/// Error type for view configuration and persistence failures.
///
/// Malformed records and missing source locations never surface here:
/// scanning tolerates both by skipping the affected item (see `scan`).
#[derive(Debug, Error)]
pub enum ViewError {
    /// A caller named a dimension that is not configured on this generator.
    #[error("unknown dimension '{dimension}'")]
    UnknownDimension {
        /// The dimension name the caller asked for.
        dimension: DimensionName,
    },
    /// A rendered document could not be persisted.
    #[error("failed to write view '{}': {source}", path.display())]
    WriteFailed {
        /// Output location of the document that failed to write.
        path: PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },
}
