//! DTOs de la API
//!
//! Requests y responses JSON del servicio.

pub mod vehicle_dto;
