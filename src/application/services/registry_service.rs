//! Short code lifecycle: create, resolve, update and delete.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::RegistryError;
use crate::domain::probe::{ProbeError, UrlProbe, is_success_class};
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::code_generator::{generate_code, is_well_formed_code};
use crate::utils::url_validator::validate_absolute_url;

/// Default lifetime of a short code.
pub const DEFAULT_TTL_DAYS: i64 = 69;

/// Service owning the short code to URL mapping.
///
/// All state lives in the repository. Expiry is enforced lazily: resolve and
/// update check it and remove an expired record when they find one. There is
/// no background sweep.
pub struct RegistryService {
    repository: Arc<dyn ShortUrlRepository>,
    probe: Arc<dyn UrlProbe>,
    ttl: Duration,
}

impl RegistryService {
    /// Creates a new registry service.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        probe: Arc<dyn UrlProbe>,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            probe,
            ttl,
        }
    }

    /// Lifetime given to newly created codes.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Shortens `url`.
    ///
    /// # Flow
    ///
    /// 1. Syntax check, then one reachability probe (no retries)
    /// 2. Derive the code from the URL
    /// 3. Insert; the store's unique key rejects an existing code, live or expired
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidUrl`] if the URL is malformed or its
    /// target answers outside 200–399.
    /// Returns [`RegistryError::ValidationUnavailable`] if the probe fails.
    /// Returns [`RegistryError::CodeCollision`] if the code is already stored.
    /// Returns [`RegistryError::Store`] on database errors.
    pub async fn create(&self, url: &str) -> Result<ShortUrl, RegistryError> {
        validate_absolute_url(url).map_err(|e| RegistryError::invalid_url(url, e.to_string()))?;

        self.check_reachable(url).await?;

        let code = generate_code(url);
        let new_url = NewShortUrl::new(code, url.to_string(), Utc::now(), self.ttl);

        match self.repository.insert(new_url).await {
            Ok(record) => {
                tracing::info!(short_code = %record.short_code, url, "Short URL created");
                Ok(record)
            }
            Err(RegistryError::CodeCollision { code }) => {
                tracing::warn!(short_code = %code, url, "Short code collision");
                Err(RegistryError::CodeCollision { code })
            }
            Err(e) => Err(e),
        }
    }

    /// Looks up `code`, counting the access.
    ///
    /// Returns the record with the post-increment `access_count`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no record holds the code.
    /// Returns [`RegistryError::Expired`] if the record had expired; it is
    /// removed as part of the failed lookup.
    /// Returns [`RegistryError::Store`] on database errors.
    pub async fn resolve(&self, code: &str) -> Result<ShortUrl, RegistryError> {
        if !is_well_formed_code(code) {
            return Err(RegistryError::not_found(code));
        }

        let now = Utc::now();
        match self.repository.record_access(code, now).await? {
            Some(record) => Ok(record),
            None => Err(self.settle_miss(code, now).await),
        }
    }

    /// Points `code` at `new_url`.
    ///
    /// Sets `last_updated_at` to now and resets `access_count` to zero.
    /// `short_code` and `expiration_date` are unchanged. The new URL is
    /// syntax-checked but not probed.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidUrl`] if `new_url` is malformed.
    /// Returns [`RegistryError::NotFound`] / [`RegistryError::Expired`] as for
    /// [`Self::resolve`].
    /// Returns [`RegistryError::Store`] on database errors.
    pub async fn update(&self, code: &str, new_url: &str) -> Result<ShortUrl, RegistryError> {
        validate_absolute_url(new_url)
            .map_err(|e| RegistryError::invalid_url(new_url, e.to_string()))?;

        if !is_well_formed_code(code) {
            return Err(RegistryError::not_found(code));
        }

        let now = Utc::now();
        match self.repository.update_url(code, new_url, now).await? {
            Some(record) => {
                tracing::info!(short_code = %code, url = new_url, "Short URL updated");
                Ok(record)
            }
            None => Err(self.settle_miss(code, now).await),
        }
    }

    /// Permanently removes `code`.
    ///
    /// Deleting the same code twice fails the second time.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no record holds the code.
    /// Returns [`RegistryError::Store`] on database errors.
    pub async fn delete(&self, code: &str) -> Result<(), RegistryError> {
        if !is_well_formed_code(code) {
            return Err(RegistryError::not_found(code));
        }

        if self.repository.delete(code).await? {
            tracing::info!(short_code = %code, "Short URL deleted");
            Ok(())
        } else {
            Err(RegistryError::not_found(code))
        }
    }

    /// Number of stored records, expired ones included.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Store`] on database errors.
    pub async fn stored_count(&self) -> Result<i64, RegistryError> {
        self.repository.count().await
    }

    /// Runs the probe once and maps its verdict onto the error taxonomy.
    async fn check_reachable(&self, url: &str) -> Result<(), RegistryError> {
        match self.probe.probe(url).await {
            Ok(status) if is_success_class(status) => Ok(()),
            Ok(status) => {
                tracing::warn!(url, status, "URL failed reachability check");
                Err(RegistryError::invalid_url(
                    url,
                    format!("target responded with status {status}"),
                ))
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "Reachability probe failed");
                Err(RegistryError::ValidationUnavailable {
                    url: url.to_string(),
                    reason: match e {
                        ProbeError::Timeout(_) => "timed out".to_string(),
                        ProbeError::Request(reason) => reason,
                    },
                })
            }
        }
    }

    /// Explains why a conditional write on a live record matched nothing.
    ///
    /// An expired record is deleted here, but only while it is still expired
    /// at `now`: if the code was deleted and re-created in between, the new
    /// record is kept. A record that is live by now was inserted after the
    /// write ran, so the write still counts as a miss.
    async fn settle_miss(&self, code: &str, now: DateTime<Utc>) -> RegistryError {
        let record = match self.repository.find_by_code(code).await {
            Ok(record) => record,
            Err(e) => return e,
        };

        match record {
            Some(record) if record.is_expired_at(now) => {
                match self.repository.delete_if_expired(code, now).await {
                    Ok(true) => {
                        tracing::info!(
                            short_code = %code,
                            expired_at = %record.expiration_date,
                            "Removed expired short URL"
                        );
                        RegistryError::expired(code)
                    }
                    Ok(false) => RegistryError::not_found(code),
                    Err(e) => e,
                }
            }
            _ => RegistryError::not_found(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::probe::MockUrlProbe;
    use crate::domain::repositories::MockShortUrlRepository;
    use std::sync::Mutex;

    const URL: &str = "https://example.com";

    fn record(code: &str, url: &str, expiration_date: DateTime<Utc>, access_count: i64) -> ShortUrl {
        let created_at = expiration_date - Duration::days(DEFAULT_TTL_DAYS);
        ShortUrl::new(
            code.to_string(),
            url.to_string(),
            created_at,
            created_at,
            expiration_date,
            access_count,
        )
    }

    fn live_record(code: &str, access_count: i64) -> ShortUrl {
        record(code, URL, Utc::now() + Duration::days(30), access_count)
    }

    fn expired_record(code: &str) -> ShortUrl {
        record(code, URL, Utc::now() - Duration::days(1), 7)
    }

    fn probe_answering(status: u16) -> MockUrlProbe {
        let mut probe = MockUrlProbe::new();
        probe.expect_probe().times(1).returning(move |_| Ok(status));
        probe
    }

    fn unused_probe() -> MockUrlProbe {
        let mut probe = MockUrlProbe::new();
        probe.expect_probe().times(0);
        probe
    }

    fn service(repo: MockShortUrlRepository, probe: MockUrlProbe) -> RegistryService {
        RegistryService::new(
            Arc::new(repo),
            Arc::new(probe),
            Duration::days(DEFAULT_TTL_DAYS),
        )
    }

    // ─── CREATE ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_success() {
        let mut repo = MockShortUrlRepository::new();
        let expected_code = generate_code(URL);

        repo.expect_insert()
            .withf(move |new_url| {
                new_url.short_code == generate_code(URL)
                    && new_url.original_url == URL
                    && new_url.expiration_date - new_url.created_at
                        == Duration::days(DEFAULT_TTL_DAYS)
            })
            .times(1)
            .returning(|new_url| Ok(new_url.into_record()));

        let service = service(repo, probe_answering(200));
        let created = service.create(URL).await.unwrap();

        assert_eq!(created.short_code, expected_code);
        assert_eq!(created.original_url, URL);
        assert_eq!(created.access_count, 0);
        assert_eq!(created.created_at, created.last_updated_at);
    }

    #[tokio::test]
    async fn test_create_accepts_redirect_status() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|new_url| Ok(new_url.into_record()));

        let service = service(repo, probe_answering(302));
        assert!(service.create(URL).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_error_status() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_insert().times(0);

        let service = service(repo, probe_answering(404));
        let err = service.create(URL).await.unwrap_err();

        assert!(matches!(err, RegistryError::InvalidUrl { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_create_probe_failure_is_validation_unavailable() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_insert().times(0);

        let mut probe = MockUrlProbe::new();
        probe
            .expect_probe()
            .times(1)
            .returning(|_| Err(ProbeError::Timeout(std::time::Duration::from_secs(5))));

        let service = service(repo, probe);
        let err = service.create(URL).await.unwrap_err();

        assert!(matches!(err, RegistryError::ValidationUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_create_malformed_url_skips_probe() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_insert().times(0);

        let service = service(repo, unused_probe());
        let err = service.create("not-a-url").await.unwrap_err();

        assert!(matches!(err, RegistryError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_create_collision() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_insert().times(1).returning(|new_url| {
            Err(RegistryError::CodeCollision {
                code: new_url.short_code,
            })
        });

        let service = service(repo, probe_answering(200));
        let err = service.create(URL).await.unwrap_err();

        match err {
            RegistryError::CodeCollision { code } => assert_eq!(code, generate_code(URL)),
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_store_error_propagates() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(sqlx::Error::PoolTimedOut.into()));

        let service = service(repo, probe_answering(200));
        let err = service.create(URL).await.unwrap_err();

        assert!(matches!(err, RegistryError::Store(_)));
    }

    // ─── RESOLVE ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_resolve_increments_access_count() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_record_access()
            .withf(|code, _| code == "b7bf24")
            .times(1)
            .returning(|code, _| Ok(Some(live_record(code, 1))));
        repo.expect_find_by_code().times(0);

        let service = service(repo, unused_probe());
        let resolved = service.resolve("b7bf24").await.unwrap();

        assert_eq!(resolved.access_count, 1);
        assert_eq!(resolved.original_url, URL);
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_record_access()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_delete().times(0);

        let service = service(repo, unused_probe());
        let err = service.resolve("b7bf24").await.unwrap_err();

        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_expired_removes_record() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_record_access()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(expired_record(code))));
        repo.expect_delete().times(0);
        repo.expect_delete_if_expired()
            .withf(|code, _| code == "b7bf24")
            .times(1)
            .returning(|_, _| Ok(true));

        let service = service(repo, unused_probe());
        let err = service.resolve("b7bf24").await.unwrap_err();

        assert!(matches!(err, RegistryError::Expired { .. }));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_resolve_expiry_removal_uses_lookup_time() {
        let seen_at: Arc<Mutex<Option<DateTime<Utc>>>> = Arc::new(Mutex::new(None));

        let mut repo = MockShortUrlRepository::new();
        let record_seen = seen_at.clone();
        repo.expect_record_access()
            .times(1)
            .returning(move |_, now| {
                *record_seen.lock().unwrap() = Some(now);
                Ok(None)
            });
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(expired_record(code))));
        let delete_seen = seen_at.clone();
        repo.expect_delete_if_expired()
            .withf(move |code, now| {
                code == "b7bf24" && *delete_seen.lock().unwrap() == Some(*now)
            })
            .times(1)
            .returning(|_, _| Ok(true));

        let service = service(repo, unused_probe());
        let err = service.resolve("b7bf24").await.unwrap_err();

        assert!(matches!(err, RegistryError::Expired { .. }));
    }

    #[tokio::test]
    async fn test_resolve_keeps_record_recreated_after_expiry_check() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_record_access()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(expired_record(code))));
        repo.expect_delete().times(0);
        repo.expect_delete_if_expired()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = service(repo, unused_probe());
        let err = service.resolve("b7bf24").await.unwrap_err();

        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_record_inserted_after_miss_is_not_found() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_record_access()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(live_record(code, 0))));
        repo.expect_delete().times(0);

        let service = service(repo, unused_probe());
        let err = service.resolve("b7bf24").await.unwrap_err();

        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_store() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_record_access().times(0);
        repo.expect_find_by_code().times(0);

        let service = service(repo, unused_probe());
        let err = service.resolve("not-a-code").await.unwrap_err();

        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_store_error_propagates() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_record_access()
            .times(1)
            .returning(|_, _| Err(sqlx::Error::PoolTimedOut.into()));

        let service = service(repo, unused_probe());
        let err = service.resolve("b7bf24").await.unwrap_err();

        assert!(matches!(err, RegistryError::Store(_)));
    }

    // ─── UPDATE ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_update_success() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_update_url()
            .withf(|code, url, _| code == "b7bf24" && url == "https://rust-lang.org")
            .times(1)
            .returning(|code, url, now| {
                let mut updated = record(code, url, now + Duration::days(10), 0);
                updated.last_updated_at = now;
                Ok(Some(updated))
            });

        let service = service(repo, unused_probe());
        let updated = service
            .update("b7bf24", "https://rust-lang.org")
            .await
            .unwrap();

        assert_eq!(updated.original_url, "https://rust-lang.org");
        assert_eq!(updated.access_count, 0);
    }

    #[tokio::test]
    async fn test_update_does_not_probe() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_update_url()
            .times(1)
            .returning(|code, url, now| Ok(Some(record(code, url, now + Duration::days(1), 0))));

        let service = service(repo, unused_probe());
        assert!(service.update("b7bf24", "https://rust-lang.org").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_update_url()
            .times(1)
            .returning(|_, _, _| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repo, unused_probe());
        let err = service
            .update("b7bf24", "https://rust-lang.org")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_expired_removes_record() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_update_url()
            .times(1)
            .returning(|_, _, _| Ok(None));
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(expired_record(code))));
        repo.expect_delete_if_expired()
            .times(1)
            .returning(|_, _| Ok(true));

        let service = service(repo, unused_probe());
        let err = service
            .update("b7bf24", "https://rust-lang.org")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistryError::Expired { .. }));
    }

    #[tokio::test]
    async fn test_update_malformed_url() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_update_url().times(0);

        let service = service(repo, unused_probe());
        let err = service.update("b7bf24", "ftp://files").await.unwrap_err();

        assert!(matches!(err, RegistryError::InvalidUrl { .. }));
    }

    // ─── DELETE ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_delete_success() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_delete()
            .withf(|code| code == "b7bf24")
            .times(1)
            .returning(|_| Ok(true));

        let service = service(repo, unused_probe());
        assert!(service.delete("b7bf24").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = service(repo, unused_probe());
        let err = service.delete("b7bf24").await.unwrap_err();

        assert!(matches!(err, RegistryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_stored_count() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_count().times(1).returning(|| Ok(3));

        let service = service(repo, unused_probe());
        assert_eq!(service.stored_count().await.unwrap(), 3);
    }
}
