use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::CheckoutController;
use crate::dto::checkout_dto::{CheckoutResponse, PaymentMethodRequest, SetDatesRequest, StartCheckoutRequest};
use crate::dto::common::ApiResponse;
use crate::models::auth::RenterIdentity;
use crate::models::booking::Booking;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checkout_router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_checkout))
        .route("/:id", axum::routing::get(get_checkout).delete(abandon_checkout))
        .route("/:id/dates", put(set_dates))
        .route("/:id/payment", post(proceed_to_payment))
        .route("/:id/payment-method", post(payment_method))
        .route("/:id/back", post(back_to_summary))
        .route("/:id/confirm", post(confirm))
}

async fn start_checkout(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Json(request): Json<StartCheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let response = CheckoutController::new(&state).start(request.vehicle_id, &identity).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_checkout(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let response = CheckoutController::new(&state).get(id, &identity).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn set_dates(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Path(id): Path<Uuid>,
    Json(request): Json<SetDatesRequest>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let response = CheckoutController::new(&state).set_dates(id, &identity, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn proceed_to_payment(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let response = CheckoutController::new(&state).proceed_to_payment(id, &identity).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn payment_method(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Path(id): Path<Uuid>,
    Json(request): Json<PaymentMethodRequest>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let response = CheckoutController::new(&state).payment_method(id, &identity, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn back_to_summary(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let response = CheckoutController::new(&state).back_to_summary(id, &identity).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn confirm(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = CheckoutController::new(&state).confirm(id, &identity).await?;
    Ok(Json(ApiResponse::success_with_message(booking, "Booking confirmed")))
}

async fn abandon_checkout(
    State(state): State<AppState>,
    identity: RenterIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    CheckoutController::new(&state).abandon(id, &identity).await?;
    Ok(Json(ApiResponse::message("Checkout abandoned")))
}
