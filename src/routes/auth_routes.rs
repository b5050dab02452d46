use axum::{extract::State, routing::{get, post}, Json, Router};

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedRenter;
use crate::models::user::UserResponse;
use crate::services::auth_service::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        state.users.clone(),
        state.jwt.clone(),
        state.config.admin_invite_code.clone(),
        state.config.bcrypt_cost,
    )
}

/// Configura las rutas de autenticación
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me).put(update_me))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let response = auth_service(&state).register(request).await?;
    Ok(Json(ApiResponse::success_with_message(response, "Account created successfully")))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let response = auth_service(&state).login(request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn me(
    State(state): State<AppState>,
    renter: AuthenticatedRenter,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let profile = auth_service(&state).profile(renter.renter_id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

async fn update_me(
    State(state): State<AppState>,
    renter: AuthenticatedRenter,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let profile = auth_service(&state).update_profile(renter.renter_id, request).await?;
    Ok(Json(ApiResponse::success_with_message(profile, "Profile updated successfully")))
}
