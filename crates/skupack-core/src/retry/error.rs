//! Error type for a single HTTP GET.

use thiserror::Error;

/// Failure of one HTTP request after transport-level retries.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, bad URL, etc.).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// Server kept answering with a retryable status (429/5xx).
    #[error("HTTP {0}")]
    Http(u32),
}
