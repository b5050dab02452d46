use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::VehicleController;
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::QuoteQuery;
use crate::models::vehicle::{Vehicle, VehicleFilters};
use crate::services::quote::BookingQuote;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Catálogo público
pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/quote", get(quote_vehicle))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let vehicles = VehicleController::new(&state).list(&filters).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let vehicle = VehicleController::new(&state).get(id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn quote_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ApiResponse<BookingQuote>>, AppError> {
    let quote = VehicleController::new(&state).quote(id, &query, state.today()).await?;
    Ok(Json(ApiResponse::success(quote)))
}
