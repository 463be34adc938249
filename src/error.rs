//! Error types for metadata operations.

use thiserror::Error;

/// Errors that can occur when fetching instance metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The base URL could not be parsed or cannot carry a path.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Request timed out.
    #[error("request timeout")]
    Timeout,

    /// HTTP error with status code.
    #[error("http {0}")]
    Http(u16),

    /// The request could not be sent or no response was received.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body could not be read to completion.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// JSON deserialization error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Response exceeds maximum allowed size.
    #[error("response too large: {0} bytes exceeds limit of {1} bytes")]
    TooLarge(usize, usize),
}

impl MetadataError {
    /// Classify an error raised while sending a request.
    pub(crate) fn request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MetadataError::Timeout
        } else {
            MetadataError::Request(err)
        }
    }

    /// Classify an error raised while reading a response body.
    pub(crate) fn body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MetadataError::Timeout
        } else {
            MetadataError::Body(err)
        }
    }
}
