//! Outbound reachability check performed before a URL is shortened.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Failure of the probe itself, as opposed to a reachable target answering
/// with an error status.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(String),
}

/// Checks whether a URL answers.
///
/// # Implementations
///
/// - [`crate::infrastructure::probe::HttpUrlProbe`] - HTTP GET with a bounded timeout
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlProbe: Send + Sync {
    /// Requests `url` once and returns the final HTTP status code.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] when no status could be obtained.
    async fn probe(&self, url: &str) -> Result<u16, ProbeError>;
}

/// Returns true for the status codes that count as reachable (200–399).
pub fn is_success_class(status: u16) -> bool {
    (200..400).contains(&status)
}
