//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El store se construye una sola vez en `main`.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::VehicleController;
use crate::repositories::VehicleStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VehicleStore>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn VehicleStore>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }

    /// Controller de vehículos ligado al store compartido
    pub fn vehicle_controller(&self) -> VehicleController {
        VehicleController::new(self.store.clone(), self.config.default_list_limit)
    }
}
