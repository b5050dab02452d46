use axum::{extract::State, routing::get, Json, Router};

use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedRenter;
use crate::models::payment::{CardDetails, PaymentMethod};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Tarjetas guardadas del renter
pub fn create_payment_router() -> Router<AppState> {
    Router::new().route("/", get(list_payment_methods).post(add_payment_method))
}

async fn list_payment_methods(
    State(state): State<AppState>,
    renter: AuthenticatedRenter,
) -> Result<Json<ApiResponse<Vec<PaymentMethod>>>, AppError> {
    let methods = state.payments.list_payment_methods(renter.renter_id).await?;
    Ok(Json(ApiResponse::success(methods)))
}

async fn add_payment_method(
    State(state): State<AppState>,
    renter: AuthenticatedRenter,
    Json(card): Json<CardDetails>,
) -> Result<Json<ApiResponse<PaymentMethod>>, AppError> {
    let method = state
        .payments
        .add_payment_method(renter.renter_id, card, state.today())
        .await?;
    Ok(Json(ApiResponse::success_with_message(method, "Payment method added")))
}
