//! Fleet Vehicles - API de gestión de vehículos de flota
//!
//! CRUD de vehículos sobre PostgreSQL con una política de estados:
//! un vehículo en `Maintenance` solo puede volver a `Available`, y solo los
//! vehículos `Available` se pueden eliminar.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
