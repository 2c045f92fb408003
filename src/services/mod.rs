//! Servicios de negocio
//!
//! Política de estados y carga inicial de datos.

pub mod seed_service;
pub mod status_policy;

pub use status_policy::{is_deletable, is_transition_allowed};
