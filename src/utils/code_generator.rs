//! Deterministic short code generation.
//!
//! A code is the first [`CODE_LENGTH`] hex characters of the MD5 digest of
//! the URL string. The same URL always maps to the same code, so shortening a
//! URL that is already stored is reported as a collision rather than producing
//! a second live code.

use md5::{Digest, Md5};

/// Number of hex characters in a short code.
pub const CODE_LENGTH: usize = 6;

/// Derives the short code for `url`.
///
/// Pure and infallible for any input. The URL is hashed exactly as given,
/// without normalization.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code("https://example.com");
/// assert_eq!(code.len(), 6);
/// assert_eq!(code, generate_code("https://example.com"));
/// ```
pub fn generate_code(url: &str) -> String {
    let digest = Md5::digest(url.as_bytes());
    let mut code = hex::encode(digest);
    code.truncate(CODE_LENGTH);
    code
}

/// Returns true if `code` has the shape of a generated code
/// (exactly [`CODE_LENGTH`] lowercase hex characters).
///
/// Anything else cannot be stored, so lookups can fail fast without a store
/// round-trip.
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
