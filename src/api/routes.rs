//! API route configuration.

use crate::api::handlers::{
    create_short_url_handler, delete_short_url_handler, get_short_url_handler,
    update_short_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short code lifecycle routes.
///
/// # Endpoints
///
/// - `POST   /shorten?url=...`                - Create a short code
/// - `PUT    /shorten?short_code=...&url=...` - Point a code at a new URL
/// - `GET    /shorten/{code}`                 - Resolve a code (counts the access)
/// - `DELETE /shorten/{code}`                 - Delete a code
pub fn shorten_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shorten",
            post(create_short_url_handler).put(update_short_url_handler),
        )
        .route(
            "/shorten/{code}",
            get(get_short_url_handler).delete(delete_short_url_handler),
        )
}
