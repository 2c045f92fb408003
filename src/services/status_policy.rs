//! Política de estados de vehículos
//!
//! Reglas puras que la capa de requests aplica antes de escribir en el store:
//! un vehículo en `Maintenance` solo puede pasar a `Available`, y solo se
//! pueden borrar vehículos `Available`.

use crate::models::vehicle::VehicleStatus;

/// ¿Se permite pasar de `current` a `next`?
pub fn is_transition_allowed(current: VehicleStatus, next: VehicleStatus) -> bool {
    if current == VehicleStatus::Maintenance && next != current {
        return next == VehicleStatus::Available;
    }
    true
}

/// ¿Se puede borrar un vehículo en este estado?
pub fn is_deletable(current: VehicleStatus) -> bool {
    current == VehicleStatus::Available
}
