pub mod health_routes;
pub mod vehicle_routes;

use axum::{error_handling::HandleErrorLayer, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{cors_middleware, handle_middleware_error};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router completo de la aplicación, con middleware
pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_middleware(state.config.cors_origins.as_deref());
    let request_timeout = state.config.request_timeout;

    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
