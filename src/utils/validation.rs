//! Utilidades de validación
//!
//! Validadores personalizados para `validator`, usados tanto por los DTOs
//! como por los stores antes de persistir.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::models::vehicle::VehicleStatus;
use crate::utils::errors::field_error;

pub const LICENSE_PLATE_MAX_LEN: usize = 6;

lazy_static! {
    /// Matrícula: 1 a 6 letras o dígitos, sin distinguir mayúsculas
    pub static ref LICENSE_PLATE_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9]{1,6}$").unwrap();
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len == 0 || len > LICENSE_PLATE_MAX_LEN {
        return Err(field_error(
            "length",
            &value,
            format!(
                "license_plate must be between 1 and {} characters",
                LICENSE_PLATE_MAX_LEN
            ),
        ));
    }

    if !LICENSE_PLATE_REGEX.is_match(value) {
        return Err(field_error(
            "format",
            &value,
            "license_plate may only contain letters and digits".to_string(),
        ));
    }

    Ok(())
}

/// Validar que el estado pertenezca al enum de estados permitidos
pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    value.parse::<VehicleStatus>().map(|_| ()).map_err(|_| {
        field_error(
            "status",
            &value,
            format!("status must be one of {}", VehicleStatus::allowed_values()),
        )
    })
}
