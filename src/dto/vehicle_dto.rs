use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{NewVehicle, Vehicle, VehiclePatch, VehicleStatus};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::{validate_license_plate, validate_status};

// Request para crear un vehículo. Los campos son opcionales en el JSON
// para poder devolver un 422 por campo en lugar de un error de parseo.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(
        required(message = "license_plate is required"),
        custom = "validate_license_plate"
    )]
    pub license_plate: Option<String>,

    #[validate(required(message = "status is required"), custom = "validate_status")]
    pub status: Option<String>,
}

impl CreateVehicleRequest {
    /// Convertir a `NewVehicle`. Llamar después de `validate()`.
    pub fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        let license_plate = self.license_plate.ok_or_else(|| {
            validation_error(
                "license_plate",
                "required",
                &serde_json::Value::Null,
                "license_plate is required".to_string(),
            )
        })?;
        let raw_status = self.status.ok_or_else(|| {
            validation_error(
                "status",
                "required",
                &serde_json::Value::Null,
                "status is required".to_string(),
            )
        })?;

        Ok(NewVehicle::new(license_plate, parse_status(&raw_status)?))
    }
}

// Request para actualizar un vehículo (semántica patch)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,

    #[validate(custom = "validate_status")]
    pub status: Option<String>,
}

impl UpdateVehicleRequest {
    /// Convertir a `VehiclePatch`. Llamar después de `validate()`.
    pub fn into_patch(self) -> AppResult<VehiclePatch> {
        let status = match self.status {
            Some(raw) => Some(parse_status(&raw)?),
            None => None,
        };

        Ok(VehiclePatch {
            license_plate: self.license_plate,
            status,
        })
    }
}

fn parse_status(raw: &str) -> AppResult<VehicleStatus> {
    raw.parse::<VehicleStatus>().map_err(|_| {
        validation_error(
            "status",
            "status",
            &raw,
            format!("status must be one of {}", VehicleStatus::allowed_values()),
        )
    })
}

// Query para listar vehículos
#[derive(Debug, Default, Deserialize)]
pub struct ListVehiclesQuery {
    pub limit: Option<i64>,
}

// Response de un vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub vehicle: Vehicle,
}

// Response de búsqueda por id: `null` si no existe
#[derive(Debug, Serialize)]
pub struct VehicleLookupResponse {
    pub vehicle: Option<Vehicle>,
}

// Response de listado
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub vehicles: Vec<Vehicle>,
}

// Response de borrado: número de filas eliminadas
#[derive(Debug, Serialize)]
pub struct VehicleDeletedResponse {
    pub vehicle_deleted: u64,
}
