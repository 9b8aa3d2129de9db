//! Handlers for the `/shorten` endpoints: create, resolve, update, delete.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortUrlResponse, ShortenQuery, UpdateShortUrlQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /shorten?url=https://example.com`
///
/// The target is probed once before a code is issued.
///
/// # Response
///
/// ```json
/// {
///   "short_code": "a1b2c3",
///   "original_url": "https://example.com",
///   "created_at": "2024-01-15 10:30:00 AM",
///   "last_updated_at": "2024-01-15 10:30:00 AM",
///   "expiration_date": "2024-03-24 10:30:00 AM",
///   "access_count": 0
/// }
/// ```
///
/// # Errors
///
/// - 404 Not Found if the URL is invalid, unreachable or could not be probed
/// - 409 Conflict if the URL's code is already stored
/// - 400 Bad Request if the `url` parameter is missing, empty or too long
pub async fn create_short_url_handler(
    State(state): State<AppState>,
    query: Result<Query<ShortenQuery>, QueryRejection>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let record = state.registry.create(&query.url).await?;

    Ok(Json(record.into()))
}

/// Resolves a short code, counting the access.
///
/// # Endpoint
///
/// `GET /shorten/{code}`
///
/// Returns the record with the incremented `access_count`.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist or has expired.
pub async fn get_short_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let record = state.registry.resolve(&code).await?;

    Ok(Json(record.into()))
}

/// Points an existing short code at a new URL.
///
/// # Endpoint
///
/// `PUT /shorten?short_code=a1b2c3&url=https://rust-lang.org`
///
/// Resets `access_count` to 0 and bumps `last_updated_at`. The code and its
/// expiration date are unchanged.
///
/// # Errors
///
/// - 404 Not Found if the code does not exist or has expired, or the new URL is malformed
/// - 400 Bad Request if a parameter is missing, empty or too long
pub async fn update_short_url_handler(
    State(state): State<AppState>,
    query: Result<Query<UpdateShortUrlQuery>, QueryRejection>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let record = state
        .registry
        .update(&query.short_code, &query.url)
        .await?;

    Ok(Json(record.into()))
}

/// Permanently deletes a short code.
///
/// # Endpoint
///
/// `DELETE /shorten/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist, including when it was
/// already deleted.
pub async fn delete_short_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.registry.delete(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
