//! Extractores de axum que rechazan con `AppError`
//!
//! Los extractores de axum devuelven texto plano cuando el request está mal
//! formado. Estos envoltorios responden con el cuerpo de error estándar.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header, request::Parts, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;

use super::errors::{AppError, AppResult, FieldErrorDetail};

/// Cuerpo JSON; errores de tipo por campo → 422 con `details`
pub struct AppJson<T>(pub T);

/// Parámetros de ruta; valores no parseables → 400
pub struct AppPath<T>(pub T);

/// Query string; valores no parseables → 400
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(AppError::UnsupportedMediaType(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        parse_json_body(&bytes).map(AppJson)
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| AppPath(value))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| AppQuery(value))
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// JSON inválido → 400. JSON válido con un campo del tipo equivocado → 422
/// con el path del campo y el valor recibido.
pub(crate) fn parse_json_body<T: DeserializeOwned>(bytes: &[u8]) -> AppResult<T> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {}", e)))?;

    serde_path_to_error::deserialize(&value).map_err(|error| {
        let path = error.path();
        let offending = value_at(&value, path).cloned().unwrap_or(Value::Null);
        let path = match path.iter().next() {
            Some(_) => path.to_string(),
            None => "body".to_string(),
        };

        AppError::InvalidPayload(vec![FieldErrorDetail {
            path,
            value: offending,
            message: error.inner().to_string(),
        }])
    })
}

fn value_at<'a>(root: &'a Value, path: &serde_path_to_error::Path) -> Option<&'a Value> {
    path.iter().try_fold(root, |current, segment| match segment {
        Segment::Seq { index } => current.get(*index),
        Segment::Map { key } => current.get(key.as_str()),
        _ => None,
    })
}
