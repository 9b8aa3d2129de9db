//! Syntactic URL validation.
//!
//! Stored URLs are kept exactly as submitted (the short code is a hash of the
//! raw string), so this module only checks the input and never rewrites it.

use url::Url;

/// Reasons a submitted URL is rejected before any network or store work.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Checks that `input` is an absolute HTTP(S) URL.
///
/// The parser already requires a host for both schemes. Input containing
/// whitespace or control characters is rejected up front: the parser would
/// silently strip or escape them, while the raw string is what gets stored
/// and later sent back in a `Location` header.
///
/// # Security
///
/// Rejects schemes the probe must never be pointed at, such as `javascript:`,
/// `data:` and `file:`.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn validate_absolute_url(input: &str) -> Result<(), UrlValidationError> {
    if input
        .chars()
        .any(|c| c.is_control() || c.is_whitespace())
    {
        return Err(UrlValidationError::InvalidFormat(
            "URL contains whitespace or control characters".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(UrlValidationError::UnsupportedProtocol),
    }
}
