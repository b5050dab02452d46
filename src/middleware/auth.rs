//! Middleware de autenticación JWT
//!
//! Extractores de identidad: `RenterIdentity` (anónimo si no hay token),
//! `AuthenticatedRenter` (exige token) y `AdminUser` (exige administrador).

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::{
    models::auth::RenterIdentity,
    state::AppState,
    utils::errors::{AppError, BookingError},
    utils::jwt::{extract_token_from_header, verify_token},
};

#[async_trait]
impl FromRequestParts<AppState> for RenterIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => value
                .to_str()
                .map_err(|_| AppError::Unauthorized("Header Authorization inválido".to_string()))?,
            None => return Ok(RenterIdentity::Anonymous),
        };

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;

        Ok(RenterIdentity::Authenticated {
            renter_id: claims.user_id()?,
            email: claims.email,
            is_admin: claims.is_admin,
        })
    }
}

/// Renter autenticado
#[derive(Debug, Clone)]
pub struct AuthenticatedRenter {
    pub renter_id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedRenter {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match RenterIdentity::from_request_parts(parts, state).await? {
            RenterIdentity::Authenticated {
                renter_id,
                email,
                is_admin,
            } => Ok(Self {
                renter_id,
                email,
                is_admin,
            }),
            RenterIdentity::Anonymous => Err(BookingError::Unauthenticated.into()),
        }
    }
}

/// Administrador autenticado
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: Uuid,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let renter = AuthenticatedRenter::from_request_parts(parts, state).await?;
        if !renter.is_admin {
            return Err(AppError::Forbidden("Se requieren permisos de administrador".to_string()));
        }
        Ok(Self {
            user_id: renter.renter_id,
            email: renter.email,
        })
    }
}
