//! Error taxonomy of the short code registry.

use thiserror::Error;

/// Failures of the registry operations.
///
/// Client-caused failures (`InvalidUrl`, `ValidationUnavailable`,
/// `CodeCollision`, `NotFound`, `Expired`) surface as 4xx responses;
/// `Store` surfaces as a 5xx and is never retried.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The URL is malformed or its target answered outside 200–399.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The reachability probe itself failed (network error, timeout).
    #[error("Could not validate URL {url}: {reason}")]
    ValidationUnavailable { url: String, reason: String },

    /// The generated code is already claimed by a stored record.
    #[error("Short code already exists: {code}")]
    CodeCollision { code: String },

    #[error("Short code not found: {code}")]
    NotFound { code: String },

    /// The record existed but was past its expiration date; it has been removed.
    #[error("Short code has expired: {code}")]
    Expired { code: String },

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl RegistryError {
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn expired(code: impl Into<String>) -> Self {
        Self::Expired { code: code.into() }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// True for the failures callers must not be able to tell apart.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Expired { .. })
    }
}
