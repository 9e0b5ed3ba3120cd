//! Error types for the chat client.

use thiserror::Error;

/// Result type for chat client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Chat client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing API key or otherwise unusable settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status or an unusable body.
    #[error("API error: {0}")]
    Api(String),

    /// The response body did not match the expected shape.
    #[error("response parse error: {0}")]
    Parse(String),
}
