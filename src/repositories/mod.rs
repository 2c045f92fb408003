//! Repositorios
//!
//! Implementaciones del contrato `VehicleStore`.

pub mod memory_vehicle_repository;
pub mod vehicle_repository;
pub mod vehicle_store;

pub use memory_vehicle_repository::InMemoryVehicleRepository;
pub use vehicle_repository::VehicleRepository;
pub use vehicle_store::VehicleStore;
