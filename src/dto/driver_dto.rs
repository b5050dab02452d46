use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::{validate_not_empty, validate_phone, validate_rating};

fn default_true() -> bool {
    true
}

// Request para crear un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(custom = "validate_not_empty")]
    pub license_number: String,
    #[validate(range(min = 0, max = 60))]
    pub experience_years: i32,
    #[validate(custom = "validate_rating")]
    pub rating: Decimal,
    #[serde(default = "default_true")]
    pub available: bool,
    #[validate(url)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

// Request para actualizar un conductor
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub license_number: Option<String>,
    #[validate(range(min = 0, max = 60))]
    pub experience_years: Option<i32>,
    #[validate(custom = "validate_rating")]
    pub rating: Option<Decimal>,
    pub available: Option<bool>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub specialties: Option<Vec<String>>,
}
