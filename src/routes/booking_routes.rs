use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::BookingController;
use crate::dto::booking_dto::BookingsQuery;
use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedRenter;
use crate::models::auth::RenterIdentity;
use crate::models::booking::{Booking, BookingDetails};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Reservas del renter autenticado
pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/cancel", post(cancel_booking))
}

async fn my_bookings(
    State(state): State<AppState>,
    renter: AuthenticatedRenter,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<ApiResponse<Vec<BookingDetails>>>, AppError> {
    let bookings = BookingController::new(&state)
        .my_bookings(renter.renter_id, query.tab)
        .await?;
    Ok(Json(ApiResponse::success(bookings)))
}

async fn get_booking(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingDetails>>, AppError> {
    let booking = BookingController::new(&state).get(id, &identity).await?;
    Ok(Json(ApiResponse::success(booking)))
}

async fn cancel_booking(
    State(state): State<AppState>,
    renter: AuthenticatedRenter,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = BookingController::new(&state).cancel(id, renter.renter_id).await?;
    Ok(Json(ApiResponse::success_with_message(booking, "Booking cancelled")))
}
