//! Domain layer containing business entities and contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository and probe traits define contracts implemented by the
//! infrastructure layer; business rules live in
//! [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`probe`] - Outbound URL reachability contract
//! - [`errors`] - Registry error taxonomy

pub mod entities;
pub mod errors;
pub mod probe;
pub mod repositories;
