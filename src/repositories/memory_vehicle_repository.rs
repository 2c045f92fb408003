//! Store de vehículos en memoria
//!
//! Útil para desarrollo local sin PostgreSQL (`VEHICLE_STORE=memory`) y en tests.
//! Respeta el mismo contrato que el store de PostgreSQL: ids crecientes,
//! matrícula única sin distinguir mayúsculas y borrado idempotente.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use validator::Validate;

use crate::models::vehicle::{duplicate_license_plate, NewVehicle, Vehicle, VehiclePatch};
use crate::repositories::vehicle_store::VehicleStore;
use crate::utils::errors::{not_found_error, AppResult};

struct Inner {
    vehicles: BTreeMap<i64, Vehicle>,
    next_id: i64,
}

impl Inner {
    fn plate_taken(&self, license_plate: &str, except_id: Option<i64>) -> bool {
        self.vehicles.values().any(|v| {
            v.license_plate.eq_ignore_ascii_case(license_plate) && Some(v.id) != except_id
        })
    }
}

pub struct InMemoryVehicleRepository {
    inner: RwLock<Inner>,
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                vehicles: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Store precargado; el siguiente id es el mayor existente + 1
    pub fn with_vehicles(vehicles: impl IntoIterator<Item = Vehicle>) -> Self {
        let vehicles: BTreeMap<i64, Vehicle> = vehicles.into_iter().map(|v| (v.id, v)).collect();
        let next_id = vehicles.keys().next_back().map_or(1, |max| max + 1);

        Self {
            inner: RwLock::new(Inner { vehicles, next_id }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.vehicles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleRepository {
    async fn list_vehicles(&self, limit: i64) -> AppResult<Vec<Vehicle>> {
        let inner = self.inner.read().await;
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(inner.vehicles.values().take(take).cloned().collect())
    }

    async fn get_vehicle(&self, id: i64) -> AppResult<Option<Vehicle>> {
        Ok(self.inner.read().await.vehicles.get(&id).cloned())
    }

    async fn find_by_license_plate(&self, license_plate: &str) -> AppResult<Option<Vehicle>> {
        let inner = self.inner.read().await;
        Ok(inner
            .vehicles
            .values()
            .find(|v| v.license_plate.eq_ignore_ascii_case(license_plate))
            .cloned())
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        vehicle.validate()?;

        let mut inner = self.inner.write().await;
        if inner.plate_taken(&vehicle.license_plate, None) {
            return Err(duplicate_license_plate(&vehicle.license_plate));
        }

        let now = Utc::now();
        let id = inner.next_id;
        inner.next_id += 1;

        let created = Vehicle {
            id,
            license_plate: vehicle.license_plate,
            status: vehicle.status,
            created_at: vehicle.created_at.unwrap_or(now),
            updated_at: now,
        };
        inner.vehicles.insert(id, created.clone());
        Ok(created)
    }

    async fn update_vehicle(&self, id: i64, patch: VehiclePatch) -> AppResult<Vehicle> {
        let mut inner = self.inner.write().await;
        let current = inner
            .vehicles
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        patch.validate()?;
        if patch.is_empty() {
            return Ok(current);
        }

        if let Some(plate) = &patch.license_plate {
            if inner.plate_taken(plate, Some(id)) {
                return Err(duplicate_license_plate(plate));
            }
        }

        let updated = patch.apply_to(&current, Utc::now());
        inner.vehicles.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_vehicle(&self, id: i64) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        Ok(inner.vehicles.remove(&id).map_or(0, |_| 1))
    }
}
