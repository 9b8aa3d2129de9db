//! Application layer services implementing business logic.
//!
//! Services consume the domain traits (repository, probe) and expose the
//! operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::registry_service::RegistryService`] - Short code lifecycle

pub mod services;
