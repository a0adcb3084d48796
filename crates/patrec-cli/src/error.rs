//! Error types for patrec-cli

use crate::logging::LogError;
use patrec::PatrecError;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Loading, training or evaluation failed
    #[error("{0}")]
    Patrec(#[from] PatrecError),

    /// No glyphs were found in the input files
    #[error("No glyphs loaded from {0} file(s)")]
    NoSamples(usize),

    /// Logging could not be set up
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LogError),

    /// Writing the report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A report could not be encoded as JSON
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
