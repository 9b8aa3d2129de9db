//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::RegistryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for the short code registry.
///
/// The store is the single source of truth. Every mutating method is a single
/// statement so that concurrent requests for the same code cannot interleave
/// between a check and the write that depends on it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_short_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CodeCollision`] if any record, live or expired,
    /// already holds the code.
    /// Returns [`RegistryError::Store`] on database errors.
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, RegistryError>;

    /// Finds a record by code regardless of expiry. Does not touch the counter.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, RegistryError>;

    /// Increments the access counter of a record that is live at `now` and
    /// returns it with the post-increment count.
    ///
    /// Returns `Ok(None)` if no live record holds the code.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on database errors.
    async fn record_access(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortUrl>, RegistryError>;

    /// Replaces the URL of a record that is live at `now`, sets
    /// `last_updated_at = now` and resets the access counter.
    ///
    /// Returns `Ok(None)` if no live record holds the code.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on database errors.
    async fn update_url(
        &self,
        code: &str,
        original_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortUrl>, RegistryError>;

    /// Permanently removes a record.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none existed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, RegistryError>;

    /// Removes a record only if it had expired at `now`.
    ///
    /// Returns `Ok(false)` if the code is gone or now holds a live record,
    /// e.g. one re-created after the caller saw the expired row.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on database errors.
    async fn delete_if_expired(&self, code: &str, now: DateTime<Utc>)
    -> Result<bool, RegistryError>;

    /// Counts stored records, expired ones included.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on database errors.
    async fn count(&self) -> Result<i64, RegistryError>;

    /// Removes every record that had expired at `now` and returns how many.
    ///
    /// Only invoked manually (admin CLI); the service itself expires lazily.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on database errors.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RegistryError>;
}
