//! Station directory error types.

/// Errors that can occur while loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response or snapshot JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Disk cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },

    /// No source produced a station listing
    #[error("no station listing available: {message}")]
    Unavailable { message: String },
}
