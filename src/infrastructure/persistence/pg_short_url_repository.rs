//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::RegistryError;
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::db_error::is_unique_violation_on_code;

/// Row shape of the `urls` table.
#[derive(Debug, FromRow)]
struct ShortUrlRow {
    short_code: String,
    original_url: String,
    created_at: DateTime<Utc>,
    last_updated_at: DateTime<Utc>,
    expiration_date: DateTime<Utc>,
    access_count: i64,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl::new(
            row.short_code,
            row.original_url,
            row.created_at,
            row.last_updated_at,
            row.expiration_date,
            row.access_count,
        )
    }
}

/// PostgreSQL repository for short URL storage.
///
/// Duplicate codes are rejected by the `urls_pkey` constraint, and the access
/// counter is incremented in place with `UPDATE ... RETURNING`, so neither
/// operation depends on a prior read.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn insert(&self, new_url: NewShortUrl) -> Result<ShortUrl, RegistryError> {
        let result = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            INSERT INTO urls (short_code, original_url, created_at, last_updated_at, expiration_date, access_count)
            VALUES ($1, $2, $3, $3, $4, 0)
            RETURNING short_code, original_url, created_at, last_updated_at, expiration_date, access_count
            "#,
        )
        .bind(&new_url.short_code)
        .bind(&new_url.original_url)
        .bind(new_url.created_at)
        .bind(new_url.expiration_date)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on_code(&e) => Err(RegistryError::CodeCollision {
                code: new_url.short_code,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, RegistryError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT short_code, original_url, created_at, last_updated_at, expiration_date, access_count
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn record_access(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortUrl>, RegistryError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            UPDATE urls
            SET access_count = access_count + 1
            WHERE short_code = $1 AND expiration_date >= $2
            RETURNING short_code, original_url, created_at, last_updated_at, expiration_date, access_count
            "#,
        )
        .bind(code)
        .bind(now)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_url(
        &self,
        code: &str,
        original_url: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ShortUrl>, RegistryError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            UPDATE urls
            SET original_url = $2, last_updated_at = $3, access_count = 0
            WHERE short_code = $1 AND expiration_date >= $3
            RETURNING short_code, original_url, created_at, last_updated_at, expiration_date, access_count
            "#,
        )
        .bind(code)
        .bind(original_url)
        .bind(now)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, code: &str) -> Result<bool, RegistryError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_if_expired(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, RegistryError> {
        let result =
            sqlx::query("DELETE FROM urls WHERE short_code = $1 AND expiration_date < $2")
                .bind(code)
                .bind(now)
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, RegistryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RegistryError> {
        let result = sqlx::query("DELETE FROM urls WHERE expiration_date < $1")
            .bind(now)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
