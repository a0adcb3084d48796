//! Error types for patrec operations.
//!
//! Every precondition violation in the pipeline (empty classes, zero-ink
//! glyphs, singular pooled covariance, malformed bitmap files) surfaces as a
//! [`PatrecError`] and aborts the computation that hit it.

use std::fmt;

/// Main error type for patrec operations.
///
/// # Examples
///
/// ```
/// use patrec::error::PatrecError;
///
/// let err = PatrecError::DimensionMismatch {
///     expected: "10 features".to_string(),
///     actual: "256 features".to_string(),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Debug)]
pub enum PatrecError {
    /// Vector/matrix dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Matrix is singular (non-invertible).
    SingularMatrix {
        /// Magnitude of the pivot that fell below tolerance
        pivot: f32,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A class in a labeled set has no samples.
    EmptyClass {
        /// Class label
        label: String,
    },

    /// A bitmap has no foreground pixels, so its centroid is undefined.
    ZeroInk {
        /// Class label of the offending sample
        label: String,
        /// Position of the sample within its class
        index: usize,
    },

    /// A feature dimension is zero for every sample and cannot be scaled.
    DegenerateFeature {
        /// Feature dimension index
        index: usize,
    },

    /// A classifier predicted a label the evaluated set does not contain.
    UnknownLabel {
        /// Predicted label
        label: String,
    },

    /// A dataset named by the experiment configuration was not loaded.
    MissingDataset {
        /// Dataset identifier
        dataset: String,
    },

    /// Malformed bitmap input.
    Parse {
        /// 1-based line number (0 when the problem is the file name)
        line: usize,
        /// Error description
        message: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for PatrecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatrecError::DimensionMismatch { expected, actual } => {
                write!(f, "Feature dimension mismatch: expected {expected}, got {actual}")
            }
            PatrecError::SingularMatrix { pivot } => {
                write!(f, "Singular matrix detected: pivot = {pivot}, cannot invert")
            }
            PatrecError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            PatrecError::EmptyClass { label } => {
                write!(f, "Class '{label}' has no samples")
            }
            PatrecError::ZeroInk { label, index } => {
                write!(f, "Sample {index} of class '{label}' has no ink pixels")
            }
            PatrecError::DegenerateFeature { index } => {
                write!(f, "Feature {index} is zero for every sample, cannot normalize")
            }
            PatrecError::UnknownLabel { label } => {
                write!(f, "Predicted label '{label}' is not a class of the evaluated set")
            }
            PatrecError::MissingDataset { dataset } => {
                write!(f, "Dataset '{dataset}' was not loaded")
            }
            PatrecError::Parse { line, message } => {
                write!(f, "Parse error at line {line}: {message}")
            }
            PatrecError::Io(e) => write!(f, "I/O error: {e}"),
            PatrecError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            PatrecError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PatrecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatrecError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PatrecError {
    fn from(err: std::io::Error) -> Self {
        PatrecError::Io(err)
    }
}

impl From<serde_json::Error> for PatrecError {
    fn from(err: serde_json::Error) -> Self {
        PatrecError::Serialization(err.to_string())
    }
}

impl From<&str> for PatrecError {
    fn from(msg: &str) -> Self {
        PatrecError::Other(msg.to_string())
    }
}

impl From<String> for PatrecError {
    fn from(msg: String) -> Self {
        PatrecError::Other(msg)
    }
}

impl PatrecError {
    /// Create a dimension mismatch error with descriptive context
    #[must_use]
    pub fn dimension_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context}={expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an empty input error
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }

    /// Create a parse error at a given line
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PatrecError>;
