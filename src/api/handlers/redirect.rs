//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Goes through the same resolve path as `GET /shorten/{code}`: the access is
/// counted and an expired code is removed.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist or has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let record = state.registry.resolve(&code).await?;

    tracing::debug!(short_code = %code, target = %record.original_url, "Redirecting");

    Ok(Redirect::temporary(&record.original_url))
}
