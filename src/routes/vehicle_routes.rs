use axum::{extract::State, routing::get, Json, Router};

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, ListVehiclesQuery, UpdateVehicleRequest, VehicleDeletedResponse,
    VehicleListResponse, VehicleLookupResponse, VehicleResponse,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{AppJson, AppPath, AppQuery};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn list_vehicles(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListVehiclesQuery>,
) -> Result<Json<VehicleListResponse>, AppError> {
    let response = state.vehicle_controller().list(query.limit).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<VehicleLookupResponse>, AppError> {
    let response = state.vehicle_controller().get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateVehicleRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let response = state.vehicle_controller().create(request).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<UpdateVehicleRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    let response = state.vehicle_controller().update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<VehicleDeletedResponse>, AppError> {
    let response = state.vehicle_controller().delete(id).await?;
    Ok(Json(response))
}
