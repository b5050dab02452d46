//! Servicio de autenticación
//!
//! Registro, login con JWT, perfil y promoción a administrador.

use bcrypt::{hash, verify};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::models::user::{User, UserResponse};
use crate::repositories::UserRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
    admin_invite_code: Option<String>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt: JwtConfig,
        admin_invite_code: Option<String>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            jwt,
            admin_invite_code,
            bcrypt_cost,
        }
    }

    fn issue(&self, user: User) -> AppResult<AuthResponse> {
        let access_token = generate_token(user.id, &user.email, user.is_admin, &self.jwt)?;
        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.expiration,
            user: UserResponse::from(user),
        })
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate().map_err(AppError::Validation)?;

        if request.password != request.confirm_password {
            return Err(validation_error("confirm_password", "Passwords do not match"));
        }

        let email = request.email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let is_admin = match (&request.admin_code, &self.admin_invite_code) {
            (Some(given), Some(expected)) if given == expected => true,
            (Some(_), _) => {
                warn!("⚠️ Código de administrador inválido en registro de {}", email);
                false
            }
            _ => false,
        };

        let password_hash = hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))?;

        let user = User {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            email,
            phone: request.phone,
            address: request.address,
            profile_image: None,
            is_admin,
            password_hash,
            created_at: Utc::now(),
        };

        let user = self.users.create(&user).await?;
        info!("👤 Usuario registrado: {} (admin: {})", user.email, user.is_admin);
        self.issue(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate().map_err(AppError::Validation)?;

        let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(invalid)?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;
        if !valid {
            return Err(invalid());
        }

        info!("🔑 Login correcto: {}", user.email);
        self.issue(user)
    }

    pub async fn profile(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("User", &user_id.to_string()))?;
        Ok(user.into())
    }

    pub async fn update_profile(&self, user_id: Uuid, request: UpdateProfileRequest) -> AppResult<UserResponse> {
        request.validate().map_err(AppError::Validation)?;

        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("User", &user_id.to_string()))?;

        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if request.phone.is_some() {
            user.phone = request.phone;
        }
        if request.address.is_some() {
            user.address = request.address;
        }
        if request.profile_image.is_some() {
            user.profile_image = request.profile_image;
        }

        let updated = self
            .users
            .update(&user)
            .await?
            .ok_or_else(|| not_found_error("User", &user_id.to_string()))?;
        Ok(updated.into())
    }

    pub async fn promote(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let mut user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("User", &user_id.to_string()))?;

        user.is_admin = true;
        let updated = self
            .users
            .update(&user)
            .await?
            .ok_or_else(|| not_found_error("User", &user_id.to_string()))?;

        info!("🛡️ Usuario {} promovido a administrador", updated.email);
        Ok(updated.into())
    }
}
