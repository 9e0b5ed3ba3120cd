//! Typed errors for the import pipeline.
//!
//! `thiserror` for the library; binaries wrap these in `anyhow` context.

use thiserror::Error;

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Errors that can occur while importing an event file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The completion backend failed outright (transport, API, timeout).
    #[error("completion backend error: {0}")]
    Completion(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The extraction response did not match the event template.
    #[error("extraction response did not match the event template: {0}")]
    Extraction(#[source] serde_json::Error),

    /// A structurally valid candidate failed required-field checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Reasons a candidate record is rejected by the validator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("date {0:?} is not a YYYY-MM-DD calendar date")]
    InvalidDate(String),

    #[error("price {0} is negative")]
    NegativePrice(i64),
}
