//! HTTP reachability probe backed by `reqwest`.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::probe::{ProbeError, UrlProbe};

/// Default bound on a single probe request.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probes a URL with a single GET request.
///
/// Redirects are followed (reqwest's default policy), so the reported status
/// is that of the final response. No retries: one request per call.
pub struct HttpUrlProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpUrlProbe {
    /// Creates a probe whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl UrlProbe for HttpUrlProbe {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::debug!(url, status, "Probe answered");
                Ok(status)
            }
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout(self.timeout)),
            Err(e) => Err(ProbeError::Request(e.to_string())),
        }
    }
}
