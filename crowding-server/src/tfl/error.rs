//! TfL client error types.

/// Errors from the TfL HTTP client.
///
/// Live crowding lookups recover from all of these locally (the failure is
/// cached as an unavailable sample); the variants exist so the recovery
/// site can log what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON shape
    #[error("malformed response: {message}")]
    Malformed { message: String },
}
