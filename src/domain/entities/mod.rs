//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation input lives in a separate
//! `New*` struct, following the same pattern for every entity:
//!
//! - [`ShortUrl`] - A stored short code with its original URL and lifecycle data
//! - [`NewShortUrl`] - Input for inserting a new short code

pub mod short_url;

pub use short_url::{NewShortUrl, ShortUrl};
