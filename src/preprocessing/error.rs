//! Error types for preprocessing operations.

use std::path::PathBuf;

/// Error type for the standardization pipeline.
///
/// Row-level parse failures are not represented here: such rows are dropped and
/// counted in [`TransformSummary`](super::TransformSummary). Every variant below
/// means the call failed and nothing should be trained on its output.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessingError {
    /// The raw source file is missing or cannot be opened.
    #[error("Source not found: {path}: {reason}")]
    SourceNotFound { path: PathBuf, reason: String },
    /// The standardized artifact has not been written yet or was removed.
    #[error("Standardized dataset not found at {0}")]
    ArtifactNotFound(PathBuf),
    /// No row survived feature selection.
    #[error("Empty data: {0}")]
    EmptyData(String),
    /// A selected feature has zero standard deviation and the policy forbids it.
    #[error("Degenerate column: feature `{feature}` has zero standard deviation")]
    DegenerateColumn { feature: String },
    /// I/O error while reading or writing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Delimited-text reader or writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Statistics file could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::Serialization(err.to_string())
    }
}
