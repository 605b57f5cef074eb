//! Error types for the Kategoria library.
//!
//! All fallible operations return [`Result`], with [`KategoriaError`]
//! describing what went wrong. Failures are local and synchronous; nothing
//! in this crate retries internally.
//!
//! # Examples
//!
//! ```
//! use kategoria::error::{KategoriaError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(KategoriaError::EmptyInput)
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::dataset::DataLabel;

/// The main error type for Kategoria operations.
#[derive(Error, Debug)]
pub enum KategoriaError {
    /// A classifier was constructed with an empty class set.
    #[error("Classifier error: the set of output classes is empty")]
    EmptyClassSet,

    /// Training was invoked with no data.
    #[error("Training error: training data is empty")]
    TrainingDataEmpty,

    /// Inference was invoked before a successful training run.
    #[error("Inference error: model has not been trained")]
    ModelNotTrained,

    /// Two parallel label sequences have different lengths.
    #[error("Metric error: sequence length mismatch (expected {expected}, got {actual})")]
    LengthMismatch { expected: usize, actual: usize },

    /// A metric was computed over zero examples.
    #[error("Metric error: input sequences are empty")]
    EmptyInput,

    /// Precision is undefined: nothing was predicted as the given class.
    #[error("Metric error: no predictions of class {0}")]
    NoPredictionsOfClass(DataLabel),

    /// Recall is undefined: nothing is labeled with the given class.
    #[error("Metric error: no instances of class {0}")]
    NoInstancesOfClass(DataLabel),

    /// F-measure is undefined: both precision and recall are zero.
    #[error("Metric error: F-measure undefined for class {0}")]
    UndefinedFMeasure(DataLabel),

    /// Post-training table-shape check failed. Indicates a bug in the
    /// training algorithm itself, not a recoverable condition.
    #[error("Training invariant violation: {0}")]
    TrainingInvariantViolation(String),

    /// Corpus directory layout or label naming errors.
    #[error("Corpus error: {0}")]
    CorpusFormat(String),

    /// Tokenization errors.
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (corpus loading).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors (CLI output).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with KategoriaError.
pub type Result<T> = std::result::Result<T, KategoriaError>;

impl KategoriaError {
    /// Create a new training-invariant violation error.
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        KategoriaError::TrainingInvariantViolation(msg.into())
    }

    /// Create a new corpus format error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        KategoriaError::CorpusFormat(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KategoriaError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KategoriaError::Other(msg.into())
    }
}
