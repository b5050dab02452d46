//! Rutas de la API
//!
//! Ensambla los routers de cada recurso bajo `/api` y aplica las capas
//! comunes (CORS, trazas, compresión y límite de concurrencia).

pub mod admin_routes;
pub mod auth_routes;
pub mod booking_routes;
pub mod checkout_routes;
pub mod payment_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let max_concurrent = state.config.max_concurrent_requests;

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/checkout", checkout_routes::create_checkout_router())
        .nest("/api/bookings", booking_routes::create_booking_router())
        .nest("/api/payment-methods", payment_routes::create_payment_router())
        .nest("/api/admin", admin_routes::create_admin_router())
        .layer(ConcurrencyLimitLayer::new(max_concurrent))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "vehicle-rental",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
