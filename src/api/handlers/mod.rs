//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::{
    create_short_url_handler, delete_short_url_handler, get_short_url_handler,
    update_short_url_handler,
};
