//! Controllers
//!
//! Orquestan store y política de estados para cada operación de la API.

pub mod vehicle_controller;

pub use vehicle_controller::VehicleController;
