use std::sync::Arc;

use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDeletedResponse, VehicleListResponse,
    VehicleLookupResponse, VehicleResponse,
};
use crate::repositories::VehicleStore;
use crate::services::status_policy::{is_deletable, is_transition_allowed};
use crate::utils::errors::{AppError, AppResult};

pub const MAX_LIST_LIMIT: i64 = 1000;

pub struct VehicleController {
    store: Arc<dyn VehicleStore>,
    default_limit: i64,
}

impl VehicleController {
    pub fn new(store: Arc<dyn VehicleStore>, default_limit: i64) -> Self {
        Self {
            store,
            default_limit,
        }
    }

    pub async fn list(&self, limit: Option<i64>) -> AppResult<VehicleListResponse> {
        let limit = limit.unwrap_or(self.default_limit).clamp(1, MAX_LIST_LIMIT);
        let vehicles = self.store.list_vehicles(limit).await?;
        Ok(VehicleListResponse { vehicles })
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<VehicleLookupResponse> {
        let vehicle = self.store.get_vehicle(id).await?;
        Ok(VehicleLookupResponse { vehicle })
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<VehicleResponse> {
        request.validate()?;
        let vehicle = self.store.create_vehicle(request.into_new_vehicle()?).await?;

        tracing::info!("🚗 Vehículo creado: id={} matrícula={}", vehicle.id, vehicle.license_plate);
        Ok(VehicleResponse { vehicle })
    }

    /// Obtener, validar, aplicar la política de transición y solo entonces escribir
    pub async fn update(&self, id: i64, request: UpdateVehicleRequest) -> AppResult<VehicleResponse> {
        let current = self
            .store
            .get_vehicle(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        request.validate()?;
        let patch = request.into_patch()?;

        // Sin `status` en el payload no hay transición que validar
        if let Some(next) = patch.status {
            if !is_transition_allowed(current.status, next) {
                return Err(AppError::RejectedTransition {
                    from: current.status,
                    to: next,
                });
            }
        }

        let vehicle = self.store.update_vehicle(id, patch).await?;
        Ok(VehicleResponse { vehicle })
    }

    pub async fn delete(&self, id: i64) -> AppResult<VehicleDeletedResponse> {
        let current = self
            .store
            .get_vehicle(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if !is_deletable(current.status) {
            return Err(AppError::RejectedDeletion {
                status: current.status,
            });
        }

        let vehicle_deleted = self.store.delete_vehicle(id).await?;
        tracing::info!("🗑️ Vehículo {} eliminado ({} filas)", id, vehicle_deleted);
        Ok(VehicleDeletedResponse { vehicle_deleted })
    }
}
