//! Middleware del sistema
//!
//! CORS y timeout por request.

pub mod cors;
pub mod timeout;

pub use cors::*;
pub use timeout::*;
