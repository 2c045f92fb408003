//! Contrato del store de vehículos
//!
//! Abstracción de persistencia usada por los controllers. El store no aplica
//! reglas de transición de estado: eso lo hace la capa de requests.

use async_trait::async_trait;

use crate::models::vehicle::{NewVehicle, Vehicle, VehiclePatch};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Hasta `limit` vehículos, ordenados por `id` ascendente
    async fn list_vehicles(&self, limit: i64) -> AppResult<Vec<Vehicle>>;

    /// `None` si no existe; no es un error
    async fn get_vehicle(&self, id: i64) -> AppResult<Option<Vehicle>>;

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>>;

    /// Valida formato y unicidad de la matrícula antes de persistir
    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    /// Aplica solo los campos presentes. `NotFound` si el vehículo no existe.
    async fn update_vehicle(&self, id: i64, patch: VehiclePatch) -> AppResult<Vehicle>;

    /// Número de filas eliminadas (0 o 1)
    async fn delete_vehicle(&self, id: i64) -> AppResult<u64>;
}
