//! Modelos de datos
//!
//! Entidades de dominio del servicio.

pub mod vehicle;

pub use vehicle::{NewVehicle, Vehicle, VehiclePatch, VehicleStatus};
