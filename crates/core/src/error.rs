//! Unified error types for vocabfill.
//!
//! Callers of `fetch_vocabulary` only ever see "not found"; these variants
//! exist so the cause can still be logged or inspected through `lookup`.

/// Unified error types for the lookup pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., blank lookup key).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Transport failure or non-success HTTP status.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Response body is not valid UTF-8.
    #[error("DECODE_FAILED: {0}")]
    DecodeFailed(String),

    /// The page does not carry the embedded JSON data island.
    #[error("MARKER_MISSING: no __NEXT_DATA__ payload in page")]
    MarkerMissing,

    /// The embedded payload is not valid JSON.
    #[error("PAYLOAD_PARSE: {0}")]
    PayloadParse(String),
}

impl Error {
    /// Whether the failure happened before any page content was received.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::FetchTimeout(_) | Error::FetchTooLarge(_) | Error::HttpError(_) | Error::DecodeFailed(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::PayloadParse(err.to_string())
    }
}
