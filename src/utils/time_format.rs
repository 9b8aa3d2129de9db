//! Human-readable timestamp rendering used in API responses and the admin CLI.

use chrono::{DateTime, Utc};
use serde::Serializer;

/// `YYYY-MM-DD HH:MM:SS AM/PM`, e.g. `2021-09-01 12:00:00 PM`.
///
/// The hour is the 24-hour clock value; the AM/PM suffix is informational.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %p";

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Serde `serialize_with` adapter for [`TIMESTAMP_FORMAT`].
pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}
