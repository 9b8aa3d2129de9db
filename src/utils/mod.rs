//! Utility functions used across the application:
//!
//! - [`code_generator`] - Deterministic short code derivation
//! - [`url_validator`] - Syntactic URL checks
//! - [`db_error`] - Database error classification
//! - [`time_format`] - Timestamp rendering

pub mod code_generator;
pub mod db_error;
pub mod time_format;
pub mod url_validator;
