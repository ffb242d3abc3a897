use thiserror::Error;

/// cornerhist error type
#[derive(Error, Debug)]
pub enum Error {
    /// The number of bin-edge sequences differs from the histogram dimensionality.
    #[error(
        "shape mismatch: histogram has {ndim} dimension(s) but {edges} bin-edge sequence(s) were given"
    )]
    ShapeMismatch {
        /// Dimensionality of the count array.
        ndim: usize,
        /// Number of bin-edge sequences supplied.
        edges: usize,
    },

    /// Validation error (opt-in strict checks)
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
