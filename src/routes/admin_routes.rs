//! Rutas de administración
//!
//! Todas exigen un JWT con permisos de administrador (`AdminUser`).

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post, put},
    Json, Router,
};
use chrono::{Datelike, Utc};
use tracing::info;
use uuid::Uuid;

use crate::controllers::{BookingController, DashboardController, DriverController, VehicleController};
use crate::dto::booking_dto::{AdminBookingsQuery, UpdateBookingStatusRequest, UpdatePaymentStatusRequest};
use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::dto::vehicle_dto::{AvailabilityRequest, CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::auth::AdminUser;
use crate::models::booking::{Booking, BookingDetails};
use crate::models::driver::{Driver, DriverFilters};
use crate::models::user::UserResponse;
use crate::models::vehicle::Vehicle;
use crate::routes::auth_routes::auth_service;
use crate::services::dashboard::DashboardStats;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", post(create_vehicle))
        .route("/vehicles/:id", put(update_vehicle).delete(delete_vehicle))
        .route("/vehicles/:id/availability", patch(set_vehicle_availability))
        .route("/drivers", get(list_drivers).post(create_driver))
        .route("/drivers/:id", get(get_driver).put(update_driver).delete(delete_driver))
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id/status", patch(update_booking_status))
        .route("/bookings/:id/payment-status", patch(update_payment_status))
        .route("/dashboard", get(dashboard))
        .route("/users/:id/promote", post(promote_user))
}

fn current_year() -> i32 {
    Utc::now().year()
}

// ===== Vehículos =====

async fn create_vehicle(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    info!("🚗 {} crea vehículo {} {}", admin.email, request.name, request.model);
    let response = VehicleController::new(&state).create(request, current_year()).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = VehicleController::new(&state).update(id, request, current_year()).await?;
    Ok(Json(response))
}

async fn set_vehicle_availability(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let vehicle = VehicleController::new(&state).set_availability(id, request.available).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    VehicleController::new(&state).delete(id).await?;
    info!("🗑️ {} eliminó vehículo {}", admin.email, id);
    Ok(Json(ApiResponse::message("Vehicle deleted successfully")))
}

// ===== Conductores =====

async fn list_drivers(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(filters): Query<DriverFilters>,
) -> Result<Json<ApiResponse<Vec<Driver>>>, AppError> {
    let drivers = DriverController::new(&state).list(&filters).await?;
    Ok(Json(ApiResponse::success(drivers)))
}

async fn get_driver(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let driver = DriverController::new(&state).get(id).await?;
    Ok(Json(ApiResponse::success(driver)))
}

async fn create_driver(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    Ok(Json(DriverController::new(&state).create(request).await?))
}

async fn update_driver(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    Ok(Json(DriverController::new(&state).update(id, request).await?))
}

async fn delete_driver(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    DriverController::new(&state).delete(id).await?;
    Ok(Json(ApiResponse::message("Driver deleted successfully")))
}

// ===== Reservas =====

async fn list_bookings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<AdminBookingsQuery>,
) -> Result<Json<ApiResponse<Vec<BookingDetails>>>, AppError> {
    let bookings = BookingController::new(&state).admin_list(&query).await?;
    Ok(Json(ApiResponse::success(bookings)))
}

async fn update_booking_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = BookingController::new(&state).update_status(id, request.status).await?;
    Ok(Json(ApiResponse::success(booking)))
}

async fn update_payment_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let booking = BookingController::new(&state)
        .update_payment_status(id, request.payment_status)
        .await?;
    Ok(Json(ApiResponse::success(booking)))
}

// ===== Dashboard y usuarios =====

async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let stats = DashboardController::new(&state).stats(state.today()).await?;
    Ok(Json(ApiResponse::success(stats)))
}

async fn promote_user(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = auth_service(&state).promote(id).await?;
    info!("🛡️ {} promovió a {}", admin.email, user.email);
    Ok(Json(ApiResponse::success_with_message(user, "User promoted to administrator")))
}
