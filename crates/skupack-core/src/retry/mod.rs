//! Transport-level retry and backoff.
//!
//! Classifies curl failures and HTTP statuses (timeouts, throttling,
//! connection resets) and decides exponential backoff, so every HTTP attempt
//! made by the resolver shares one consistent policy. The batch pipeline
//! itself never retries; it only re-runs failed items on request.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
