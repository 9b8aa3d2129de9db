//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::RegistryService;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RegistryService>,
}

impl AppState {
    pub fn new(registry: Arc<RegistryService>) -> Self {
        Self { registry }
    }
}
