use thiserror::Error;


pub type Result<T> = std::result::Result<T, SplatError>;

/// Failure taxonomy for the codec and data model.
///
/// Per-record anomalies (non-finite coordinates, short ASCII lines) are
/// recovered locally by the parsers and never surface here; only
/// invariant-defining failures abort a parse.
#[derive(Debug, Error)]
pub enum SplatError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("missing required property: {0}")]
    MissingProperty(String),

    #[error("input contains no vertices")]
    EmptyInput,

    #[error("truncated data: expected {expected} bytes, found {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
