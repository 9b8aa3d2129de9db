//! DTOs for the `/shorten` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::ShortUrl;
use crate::utils::time_format;

/// Upper bound on accepted URL length, mirrored in the `length` validators below.
pub const MAX_URL_LENGTH: usize = 2048;

/// Query string of `POST /shorten?url=...`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenQuery {
    /// The URL to shorten, stored verbatim.
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Query string of `PUT /shorten?short_code=...&url=...`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateShortUrlQuery {
    pub short_code: String,

    /// New destination URL.
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Full record as returned by every successful `/shorten` call.
///
/// Timestamps are rendered as `YYYY-MM-DD HH:MM:SS AM/PM`.
#[derive(Debug, Serialize)]
pub struct ShortUrlResponse {
    pub short_code: String,
    pub original_url: String,
    #[serde(serialize_with = "time_format::serialize")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "time_format::serialize")]
    pub last_updated_at: DateTime<Utc>,
    #[serde(serialize_with = "time_format::serialize")]
    pub expiration_date: DateTime<Utc>,
    pub access_count: i64,
}

impl From<ShortUrl> for ShortUrlResponse {
    fn from(record: ShortUrl) -> Self {
        Self {
            short_code: record.short_code,
            original_url: record.original_url,
            created_at: record.created_at,
            last_updated_at: record.last_updated_at,
            expiration_date: record.expiration_date,
            access_count: record.access_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_response_renders_fixed_timestamp_format() {
        let created_at = Utc.with_ymd_and_hms(2021, 9, 1, 12, 0, 0).unwrap();
        let record = ShortUrl::new(
            "b7bf24".to_string(),
            "https://example.com".to_string(),
            created_at,
            created_at,
            created_at + Duration::days(69),
            3,
        );

        let json = serde_json::to_value(ShortUrlResponse::from(record)).unwrap();

        assert_eq!(json["short_code"], "b7bf24");
        assert_eq!(json["original_url"], "https://example.com");
        assert_eq!(json["created_at"], "2021-09-01 12:00:00 PM");
        assert_eq!(json["last_updated_at"], "2021-09-01 12:00:00 PM");
        assert_eq!(json["expiration_date"], "2021-11-09 12:00:00 PM");
        assert_eq!(json["access_count"], 3);
    }

    #[test]
    fn test_query_length_validation() {
        let empty = ShortenQuery { url: String::new() };
        assert!(empty.validate().is_err());

        let too_long = ShortenQuery {
            url: format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH)),
        };
        assert!(too_long.validate().is_err());

        let ok = ShortenQuery {
            url: "https://example.com".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
