use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::models::vehicle::{
    duplicate_license_plate, NewVehicle, Vehicle, VehiclePatch, VehicleRow,
};
use crate::repositories::vehicle_store::VehicleStore;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Store de vehículos sobre PostgreSQL
#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// La unicidad la garantiza el índice UNIQUE sobre `LOWER(license_plate)`;
/// aquí solo se traduce el error
fn map_write_error(error: sqlx::Error, license_plate: &str) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return duplicate_license_plate(license_plate);
        }
    }
    AppError::from(error)
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn list_vehicles(&self, limit: i64) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, license_plate, status, created_at, updated_at
            FROM vehicles
            ORDER BY id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn get_vehicle(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "SELECT id, license_plate, status, created_at, updated_at FROM vehicles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, license_plate, status, created_at, updated_at
            FROM vehicles
            WHERE LOWER(license_plate) = LOWER($1)
            "#,
        )
        .bind(license_plate)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        vehicle.validate()?;

        let now = Utc::now();
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (license_plate, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, license_plate, status, created_at, updated_at
            "#,
        )
        .bind(&vehicle.license_plate)
        .bind(vehicle.status.as_str())
        .bind(vehicle.created_at.unwrap_or(now))
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &vehicle.license_plate))?;

        let created = Vehicle::try_from(row)?;
        tracing::debug!("🚗 Vehículo creado: id={} matrícula={}", created.id, created.license_plate);
        Ok(created)
    }

    async fn update_vehicle(&self, id: i64, patch: VehiclePatch) -> AppResult<Vehicle> {
        // Obtener vehículo actual
        let current = self
            .get_vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        patch.validate()?;
        if patch.is_empty() {
            return Ok(current);
        }

        let merged = patch.apply_to(&current, Utc::now());
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET license_plate = $2, status = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, license_plate, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&merged.license_plate)
        .bind(merged.status.as_str())
        .bind(merged.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &merged.license_plate))?
        .ok_or_else(|| not_found_error("Vehicle", id))?;

        Vehicle::try_from(row)
    }

    async fn delete_vehicle(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
