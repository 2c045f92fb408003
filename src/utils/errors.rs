//! Sistema de manejo de errores
//!
//! Este módulo define los errores del servicio de vehículos
//! y su conversión a respuestas HTTP apropiadas.

use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::models::vehicle::VehicleStatus;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid payload: {0:?}")]
    InvalidPayload(Vec<FieldErrorDetail>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid status change from '{from}' to '{to}'.")]
    RejectedTransition {
        from: VehicleStatus,
        to: VehicleStatus,
    },

    #[error("Only vehicles with status 'Available' can be deleted. Current status: '{status}'")]
    RejectedDeletion { status: VehicleStatus },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store fault: {0}")]
    StoreFault(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Clasificar errores de sqlx: fallos de conexión vs. fallos de persistencia
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => AppError::StoreUnavailable(error.to_string()),
            other => AppError::StoreFault(other.to_string()),
        }
    }
}

/// Detalle de un campo inválido
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldErrorDetail {
    pub path: String,
    pub value: Value,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<FieldErrorDetail>>,
}

/// Respuesta de error para la API
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidPayload(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RejectedTransition { .. } | AppError::RejectedDeletion { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::StoreFault(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) | AppError::InvalidPayload(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::RejectedTransition { .. } => "INVALID_STATUS_TRANSITION",
            AppError::RejectedDeletion { .. } => "DELETION_NOT_ALLOWED",
            AppError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            AppError::StoreFault(_) => "DB_ERROR",
            AppError::Timeout => "REQUEST_TIMEOUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Mensaje visible para el cliente. Nunca incluye detalles internos de la base de datos.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(_) | AppError::InvalidPayload(_) => {
                "The provided data is invalid".to_string()
            }
            AppError::BadRequest(msg)
            | AppError::UnsupportedMediaType(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::RejectedTransition { .. } | AppError::RejectedDeletion { .. } => {
                self.to_string()
            }
            AppError::StoreUnavailable(_) => {
                "Could not connect to the database. Please try again later.".to_string()
            }
            AppError::StoreFault(_) => "A database error occurred.".to_string(),
            AppError::Timeout => "The request took too long to complete.".to_string(),
            AppError::Internal(msg) if !msg.trim().is_empty() => msg.clone(),
            AppError::Internal(_) => "An unexpected error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::StoreUnavailable(detail) => {
                tracing::error!("❌ Base de datos no disponible: {}", detail)
            }
            AppError::StoreFault(detail) => tracing::error!("❌ Error de base de datos: {}", detail),
            AppError::Internal(detail) => tracing::error!("❌ Error interno: {}", detail),
            other => tracing::warn!("⚠️ {}", other),
        }

        let details = match &self {
            AppError::Validation(errors) => Some(field_error_details(errors)),
            AppError::InvalidPayload(details) => Some(details.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorBody {
                message: self.public_message(),
                code: self.code(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Aplanar `ValidationErrors` a una lista de detalles por campo, ordenada por campo
pub fn field_error_details(errors: &ValidationErrors) -> Vec<FieldErrorDetail> {
    let mut details: Vec<FieldErrorDetail> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| FieldErrorDetail {
                path: field.to_string(),
                value: error.params.get("value").cloned().unwrap_or(Value::Null),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} failed validation ({})", field, error.code)),
            })
        })
        .collect();

    details.sort_by(|a, b| a.path.cmp(&b.path));
    details
}

/// Construir un `ValidationError` con el valor ofensivo y un mensaje
pub fn field_error<T: Serialize>(code: &'static str, value: &T, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.add_param(Cow::Borrowed("value"), value);
    error.message = Some(Cow::Owned(message));
    error
}

/// Función helper para crear errores de validación de un solo campo
pub fn validation_error<T: Serialize>(
    field: &'static str,
    code: &'static str,
    value: &T,
    message: String,
) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, field_error(code, value, message));
    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            validation_error("license_plate", "format", &"AB-1", "bad".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(not_found_error("Vehicle", 4).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InvalidPayload(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::BadRequest("bad id".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UnsupportedMediaType("json only".into()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(
            AppError::RejectedDeletion { status: VehicleStatus::InUse }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::StoreUnavailable("refused".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::StoreFault("syntax".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rejection_messages_name_statuses() {
        let transition = AppError::RejectedTransition {
            from: VehicleStatus::Maintenance,
            to: VehicleStatus::InUse,
        };
        assert_eq!(
            transition.public_message(),
            "Invalid status change from 'Maintenance' to 'InUse'."
        );

        let deletion = AppError::RejectedDeletion { status: VehicleStatus::Maintenance };
        assert!(deletion
            .public_message()
            .contains("Only vehicles with status 'Available' can be deleted"));
        assert!(deletion.public_message().contains("'Maintenance'"));
    }

    #[test]
    fn test_store_errors_hide_details() {
        let unavailable = AppError::StoreUnavailable("password authentication failed".into());
        assert!(!unavailable.public_message().contains("password"));

        let fault = AppError::StoreFault("relation \"vehicles\" does not exist".into());
        assert_eq!(fault.public_message(), "A database error occurred.");
    }

    #[test]
    fn test_sqlx_error_classification() {
        assert!(matches!(
            AppError::from(sqlx::Error::PoolTimedOut),
            AppError::StoreUnavailable(_)
        ));
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::StoreFault(_)
        ));
    }

    #[test]
    fn test_field_error_details() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "status",
            field_error("status", &"Broken", "status must be one of Available, InUse, Maintenance".into()),
        );
        errors.add(
            "license_plate",
            field_error("license_plate", &"AB-123", "invalid plate".into()),
        );

        let details = field_error_details(&errors);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].path, "license_plate");
        assert_eq!(details[0].value, Value::String("AB-123".into()));
        assert_eq!(details[1].path, "status");
        assert_eq!(details[1].message, "status must be one of Available, InUse, Maintenance");
    }
}
