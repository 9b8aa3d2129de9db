//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] - Short code storage, access counting and expiry cleanup

pub mod pg_short_url_repository;

pub use pg_short_url_repository::PgShortUrlRepository;
