use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserResponse;
use crate::utils::validation::validate_phone;

// Request de registro
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    pub confirm_password: String,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    pub address: Option<String>,

    pub admin_code: Option<String>,
}

// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

// Response de login/registro
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

// Request de actualización de perfil
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    pub address: Option<String>,

    #[validate(url)]
    pub profile_image: Option<String>,
}
