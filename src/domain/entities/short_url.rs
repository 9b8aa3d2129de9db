//! Short URL record: the mapping from a short code to its original URL.

use chrono::{DateTime, Duration, Utc};

/// A stored short URL with its lifecycle metadata.
///
/// A record is *live* while `now <= expiration_date` and *expired* afterwards.
/// Expired records are removed lazily, the next time a resolve or update
/// touches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
    pub access_count: i64,
}

impl ShortUrl {
    /// Creates a new ShortUrl instance.
    pub fn new(
        short_code: String,
        original_url: String,
        created_at: DateTime<Utc>,
        last_updated_at: DateTime<Utc>,
        expiration_date: DateTime<Utc>,
        access_count: i64,
    ) -> Self {
        Self {
            short_code,
            original_url,
            created_at,
            last_updated_at,
            expiration_date,
            access_count,
        }
    }

    /// Returns true if the record had expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiration_date
    }

    /// Returns true if the record has passed its expiration date.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for inserting a new record.
///
/// `last_updated_at` starts equal to `created_at` and `access_count` at zero,
/// so neither is carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
}

impl NewShortUrl {
    /// Builds a record created at `now` that expires `ttl` later.
    ///
    /// An expiration past the representable range is clamped to the maximum.
    pub fn new(short_code: String, original_url: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            short_code,
            original_url,
            created_at: now,
            expiration_date: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// The record as it looks right after insertion.
    pub fn into_record(self) -> ShortUrl {
        ShortUrl::new(
            self.short_code,
            self.original_url,
            self.created_at,
            self.created_at,
            self.expiration_date,
            0,
        )
    }
}
