//! Carga inicial de vehículos desde un archivo JSON
//!
//! El archivo es un array de `{ "licensePlate", "status", "createdAt"? }`.
//! Las matrículas que ya existen se saltan, así que el seed se puede repetir.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::models::vehicle::{NewVehicle, VehicleStatus};
use crate::repositories::VehicleStore;
use crate::utils::errors::{validation_error, AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedVehicle {
    pub license_plate: String,
    pub status: String,
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Acepta RFC3339 o una fecha simple `YYYY-MM-DD` (medianoche UTC)
fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl SeedVehicle {
    fn into_new_vehicle(self) -> AppResult<NewVehicle> {
        let status = self.status.parse::<VehicleStatus>().map_err(|_| {
            validation_error(
                "status",
                "status",
                &self.status,
                format!("status must be one of {}", VehicleStatus::allowed_values()),
            )
        })?;

        let created_at = match self.created_at.as_deref() {
            Some(raw) => Some(parse_created_at(raw).ok_or_else(|| {
                validation_error(
                    "created_at",
                    "datetime",
                    &raw,
                    "createdAt must be an RFC3339 timestamp or YYYY-MM-DD date".to_string(),
                )
            })?),
            None => None,
        };

        Ok(NewVehicle {
            license_plate: self.license_plate,
            status,
            created_at,
        })
    }
}

/// Insertar los vehículos del seed que todavía no existan
pub async fn seed_vehicles(
    store: &dyn VehicleStore,
    vehicles: Vec<SeedVehicle>,
) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();

    for seed in vehicles {
        if store.find_by_license_plate(&seed.license_plate).await?.is_some() {
            log::info!("⏭️ Matrícula existente, se salta: {}", seed.license_plate);
            report.skipped += 1;
            continue;
        }

        let created = store.create_vehicle(seed.into_new_vehicle()?).await?;
        log::info!("✅ Insertado: {} (id={})", created.license_plate, created.id);
        report.inserted += 1;
    }

    Ok(report)
}

/// Leer el archivo de seed y cargarlo en el store
pub async fn seed_from_file(store: &dyn VehicleStore, path: &Path) -> AppResult<SeedReport> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Internal(format!("Could not read seed file {}: {}", path.display(), e))
    })?;

    let vehicles: Vec<SeedVehicle> = serde_json::from_str(&raw).map_err(|e| {
        AppError::Internal(format!("Invalid seed file {}: {}", path.display(), e))
    })?;

    log::info!("🌱 Seed: {} vehículos en {}", vehicles.len(), path.display());
    let report = seed_vehicles(store, vehicles).await?;
    log::info!(
        "🌱 Seed completado: {} insertados, {} existentes",
        report.inserted,
        report.skipped
    );

    Ok(report)
}
