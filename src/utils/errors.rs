//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la aplicación (`AppError`), la taxonomía
//! de errores del flujo de reserva (`BookingError`) y su conversión a
//! respuestas HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores del flujo de reserva y del cálculo de precios
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Validation error on '{field}': {message}")]
    Validation { field: &'static str, message: String },

    #[error("Return date must not be earlier than pickup date")]
    InvalidDateRange,

    #[error("Pickup date is in the past")]
    PastDate,

    #[error("Vehicle is not available for booking")]
    VehicleUnavailable,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transition not allowed: {0}")]
    InvalidTransition(String),
}

impl BookingError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Código estable expuesto al cliente
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::Validation { .. } => "VALIDATION_ERROR",
            BookingError::InvalidDateRange => "INVALID_DATE_RANGE",
            BookingError::PastDate => "PAST_DATE",
            BookingError::VehicleUnavailable => "VEHICLE_UNAVAILABLE",
            BookingError::Unauthenticated => "UNAUTHENTICATED",
            BookingError::Persistence(_) => "PERSISTENCE_ERROR",
            BookingError::NotFound(_) => "NOT_FOUND",
            BookingError::InvalidTransition(_) => "INVALID_TRANSITION",
        }
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error(transparent)]
    Booking(#[from] BookingError),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, details: Option<serde_json::Value>, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details,
            code: Some(code.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database".to_string(),
                        None,
                        "DB_ERROR",
                    ),
                )
            }

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(
                        "Validation Error",
                        "The provided data is invalid".to_string(),
                        Some(json!(e)),
                        "VALIDATION_ERROR",
                    ),
                )
            }

            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("Unauthorized", msg, None, "UNAUTHORIZED"),
                )
            }

            AppError::Forbidden(msg) => {
                warn!("Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new("Forbidden", msg, None, "FORBIDDEN"),
                )
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new("Not Found", msg, None, "NOT_FOUND"),
                )
            }

            AppError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse::new("Conflict", msg, None, "CONFLICT"),
                )
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("Bad Request", msg, None, "BAD_REQUEST"),
                )
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Internal Server Error",
                        "An unexpected error occurred".to_string(),
                        None,
                        "INTERNAL_ERROR",
                    ),
                )
            }

            AppError::Jwt(msg) => {
                warn!("JWT error: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse::new("JWT Error", msg, None, "JWT_ERROR"),
                )
            }

            AppError::Hash(msg) => {
                error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Hash Error",
                        "An error occurred while processing credentials".to_string(),
                        None,
                        "HASH_ERROR",
                    ),
                )
            }

            AppError::Booking(e) => booking_error_response(e),
        };

        (status, Json(error_response)).into_response()
    }
}

fn booking_error_response(e: BookingError) -> (StatusCode, ErrorResponse) {
    let code = e.code();
    match e {
        BookingError::Validation { field, message } => {
            warn!("Booking validation error on {}: {}", field, message);
            (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation Error", message, Some(json!({ "field": field })), code),
            )
        }
        BookingError::InvalidDateRange | BookingError::PastDate => {
            warn!("Rejected date range: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::new("Invalid Dates", e.to_string(), None, code),
            )
        }
        BookingError::VehicleUnavailable => (
            StatusCode::CONFLICT,
            ErrorResponse::new("Vehicle Unavailable", e.to_string(), None, code),
        ),
        BookingError::Unauthenticated => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(
                "Unauthenticated",
                e.to_string(),
                Some(json!({ "redirect": "/login" })),
                code,
            ),
        ),
        BookingError::Persistence(msg) => {
            error!("Booking persistence failed: {}", msg);
            (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new("Persistence Error", msg, None, code),
            )
        }
        BookingError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new("Not Found", msg, None, code),
        ),
        BookingError::InvalidTransition(msg) => {
            warn!("Invalid transition: {}", msg);
            (
                StatusCode::CONFLICT,
                ErrorResponse::new("Invalid Transition", msg, None, code),
            )
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.to_string().into());
    error.add_param("field".into(), &field);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> AppError {
    AppError::Forbidden(format!("Cannot {}: {}", operation, reason))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_error_status_codes() {
        let cases = vec![
            (BookingError::validation("pickup_date", "required"), StatusCode::BAD_REQUEST),
            (BookingError::InvalidDateRange, StatusCode::UNPROCESSABLE_ENTITY),
            (BookingError::PastDate, StatusCode::UNPROCESSABLE_ENTITY),
            (BookingError::VehicleUnavailable, StatusCode::CONFLICT),
            (BookingError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (BookingError::Persistence("down".into()), StatusCode::BAD_GATEWAY),
            (BookingError::InvalidTransition("x".into()), StatusCode::CONFLICT),
        ];

        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_validation_error_helper() {
        match validation_error("email", "Email inválido") {
            AppError::Validation(errors) => {
                assert!(errors.field_errors().contains_key("email"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_not_found_error_message() {
        let err = not_found_error("Vehicle", "42");
        assert_eq!(err.to_string(), "Not found: Vehicle with id '42' not found");
    }
}
