//! Middleware de timeout por request
//!
//! Convierte los errores de la pila de tower (timeout incluido) en el
//! cuerpo de error estándar. El `TimeoutLayer` se monta en `routes`.

use axum::BoxError;
use tower::timeout::error::Elapsed;

use crate::utils::errors::AppError;

/// Handler para `HandleErrorLayer`
pub async fn handle_middleware_error(error: BoxError) -> AppError {
    if error.is::<Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(format!("Unhandled middleware error: {}", error))
    }
}
