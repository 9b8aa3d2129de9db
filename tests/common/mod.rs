#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use short_url_registry::application::services::{DEFAULT_TTL_DAYS, RegistryService};
use short_url_registry::domain::probe::{ProbeError, UrlProbe};
use short_url_registry::infrastructure::persistence::PgShortUrlRepository;
use short_url_registry::state::AppState;

/// Probe answering every URL with a fixed outcome.
pub enum StubProbe {
    Status(u16),
    Unreachable,
}

#[async_trait]
impl UrlProbe for StubProbe {
    async fn probe(&self, _url: &str) -> Result<u16, ProbeError> {
        match self {
            StubProbe::Status(status) => Ok(*status),
            StubProbe::Unreachable => Err(ProbeError::Request("connection refused".to_string())),
        }
    }
}

pub async fn insert_short_url(pool: &PgPool, code: &str, url: &str) {
    insert_short_url_created_at(pool, code, url, Utc::now()).await;
}

pub async fn insert_short_url_created_at(
    pool: &PgPool,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
) {
    sqlx::query(
        "INSERT INTO urls (short_code, original_url, created_at, last_updated_at, expiration_date)
         VALUES ($1, $2, $3, $3, $4)",
    )
    .bind(code)
    .bind(url)
    .bind(created_at)
    .bind(created_at + Duration::days(DEFAULT_TTL_DAYS))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_expired_short_url(pool: &PgPool, code: &str, url: &str) {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO urls (short_code, original_url, created_at, last_updated_at, expiration_date)
         VALUES ($1, $2, $3, $3, $4)",
    )
    .bind(code)
    .bind(url)
    .bind(now - Duration::days(DEFAULT_TTL_DAYS + 1))
    .bind(now - Duration::days(1))
    .execute(pool)
    .await
    .unwrap();
}

pub async fn stored_access_count(pool: &PgPool, code: &str) -> Option<i64> {
    sqlx::query_scalar("SELECT access_count FROM urls WHERE short_code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub async fn stored_original_url(pool: &PgPool, code: &str) -> Option<String> {
    sqlx::query_scalar("SELECT original_url FROM urls WHERE short_code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub fn create_test_state_with_probe(pool: PgPool, probe: StubProbe) -> AppState {
    let repository = Arc::new(PgShortUrlRepository::new(Arc::new(pool)));
    let registry = RegistryService::new(
        repository,
        Arc::new(probe),
        Duration::days(DEFAULT_TTL_DAYS),
    );
    AppState::new(Arc::new(registry))
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_probe(pool, StubProbe::Status(200))
}
