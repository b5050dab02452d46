use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{
    validate_category, validate_daily_rate, validate_fuel_type, validate_image_url, validate_not_empty,
    validate_transmission,
};

fn default_true() -> bool {
    true
}

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    #[validate(custom = "validate_not_empty")]
    pub brand: String,
    #[validate(custom = "validate_not_empty")]
    pub model: String,
    pub year: i32,
    #[validate(custom = "validate_daily_rate")]
    pub daily_rate: Decimal,
    #[validate(range(min = 1, max = 60))]
    pub seat_count: i32,
    #[validate(custom = "validate_transmission")]
    pub transmission: String,
    #[validate(custom = "validate_fuel_type")]
    pub fuel_type: String,
    #[validate(custom = "validate_category")]
    pub category: String,
    #[validate(custom = "validate_not_empty")]
    pub location: String,
    #[validate(custom = "validate_not_empty")]
    pub description: String,
    #[validate(custom = "validate_image_url")]
    pub image_url: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    pub driver_id: Option<Uuid>,
}

// Request para actualizar un vehículo (campos ausentes se conservan)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub brand: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub model: Option<String>,
    pub year: Option<i32>,
    #[validate(custom = "validate_daily_rate")]
    pub daily_rate: Option<Decimal>,
    #[validate(range(min = 1, max = 60))]
    pub seat_count: Option<i32>,
    #[validate(custom = "validate_transmission")]
    pub transmission: Option<String>,
    #[validate(custom = "validate_fuel_type")]
    pub fuel_type: Option<String>,
    #[validate(custom = "validate_category")]
    pub category: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub location: Option<String>,
    #[validate(custom = "validate_not_empty")]
    pub description: Option<String>,
    #[validate(custom = "validate_image_url")]
    pub image_url: Option<String>,
    pub features: Option<Vec<String>>,
    pub available: Option<bool>,
    /// `Some(None)` desasigna el conductor
    #[serde(default, with = "double_option")]
    pub driver_id: Option<Option<Uuid>>,
}

// Request para cambiar la disponibilidad
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub available: bool,
}

// Query de cotización
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub pickup_date: String,
    pub return_date: String,
}

/// Distingue campo ausente de `null` explícito
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
