//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea a la tabla `vehicles` con primary key numérica `id`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::errors::{field_error, AppError};
use crate::utils::validation::validate_license_plate;

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::InUse,
        VehicleStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::InUse => "InUse",
            VehicleStatus::Maintenance => "Maintenance",
        }
    }

    /// Lista legible de valores permitidos, para mensajes de error
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for VehicleStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(VehicleStatus::Available),
            "InUse" => Ok(VehicleStatus::InUse),
            "Maintenance" => Ok(VehicleStatus::Maintenance),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Vehicle principal. Los timestamps no se serializan hacia la API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: i64,
    pub license_plate: String,
    pub status: VehicleStatus,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// Fila tal como sale de PostgreSQL (status en texto)
#[derive(Debug, FromRow)]
pub struct VehicleRow {
    pub id: i64,
    pub license_plate: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<VehicleStatus>().map_err(|e| {
            AppError::StoreFault(format!("vehicle {} has {}", row.id, e))
        })?;

        Ok(Self {
            id: row.id,
            license_plate: row.license_plate,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Datos para crear un vehículo
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewVehicle {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: String,
    pub status: VehicleStatus,
    /// Solo lo fija el seeder; por HTTP siempre es `None`
    pub created_at: Option<DateTime<Utc>>,
}

impl NewVehicle {
    pub fn new(license_plate: impl Into<String>, status: VehicleStatus) -> Self {
        Self {
            license_plate: license_plate.into(),
            status,
            created_at: None,
        }
    }
}

/// Actualización parcial: `None` deja el campo intacto
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct VehiclePatch {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,
    pub status: Option<VehicleStatus>,
}

impl VehiclePatch {
    pub fn is_empty(&self) -> bool {
        self.license_plate.is_none() && self.status.is_none()
    }

    /// Aplicar el patch sobre una copia del vehículo actual
    pub fn apply_to(&self, vehicle: &Vehicle, now: DateTime<Utc>) -> Vehicle {
        Vehicle {
            id: vehicle.id,
            license_plate: self
                .license_plate
                .clone()
                .unwrap_or_else(|| vehicle.license_plate.clone()),
            status: self.status.unwrap_or(vehicle.status),
            created_at: vehicle.created_at,
            updated_at: now,
        }
    }
}

/// Error de unicidad de matrícula, compartido por todos los stores
pub fn duplicate_license_plate(license_plate: &str) -> AppError {
    let mut errors = validator::ValidationErrors::new();
    errors.add(
        "license_plate",
        field_error(
            "unique",
            &license_plate,
            "license_plate must be unique".to_string(),
        ),
    );
    AppError::Validation(errors)
}
