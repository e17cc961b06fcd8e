//! Detection error taxonomy
//!
//! Client faults (`InvalidInput`, `UnsupportedFormat`) surface directly to
//! the caller. Upstream faults are absorbed by the service into degraded
//! verdicts and must never escape it. `Internal` is a genuine server fault.

use std::time::Duration;
use thiserror::Error;

pub type DetectResult<T> = Result<T, DetectError>;

#[derive(Debug, Error)]
pub enum DetectError {
    /// Empty, oversized or otherwise malformed payload. Not retryable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Payload that cannot be decoded, e.g. a non-UTF-8 QR payload.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// External lookup exceeded its deadline. Recovered locally with a
    /// defaulted feature and a `partial-data` tag.
    #[error("upstream lookup timed out after {0:?}")]
    UpstreamTimeout(Duration),

    /// External lookup provider is down. Same local recovery as a timeout.
    #[error("upstream provider unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Unexpected extractor or scorer fault. Logged, surfaced as 5xx.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DetectError {
    /// Client faults map to 4xx at the transport layer, everything else
    /// to 5xx.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            DetectError::InvalidInput(_) | DetectError::UnsupportedFormat(_)
        )
    }
}
