//! Classification of database errors raised by the `urls` table.

/// Name of the primary key constraint on `urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "urls_pkey";

/// Returns true if `e` is a unique violation on the short code key,
/// i.e. the insert lost a race (or met an existing record) for its code.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}
