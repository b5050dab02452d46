//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos. Las funciones `validate_*` con firma
//! `fn(&T) -> Result<(), ValidationError>` se usan también desde
//! `#[validate(custom = "...")]`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

use crate::services::quote::CURRENCY_SCALE;

/// Categorías de vehículo aceptadas por el catálogo
pub const VEHICLE_CATEGORIES: &[&str] = &["economy", "suv", "luxury", "sports", "van", "pickup"];

/// Tipos de transmisión aceptados
pub const TRANSMISSIONS: &[&str] = &["Automatic", "Manual", "Semi-Automatic"];

/// Tipos de combustible aceptados
pub const FUEL_TYPES: &[&str] = &["Diesel", "Gasoline", "Hybrid", "Electric"];

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Display + std::fmt::Debug + Serialize>(
    value: T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Tarifa diaria estrictamente positiva y con, como mucho, dos decimales
pub fn validate_daily_rate(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)?;
    if value.normalize().scale() > CURRENCY_SCALE {
        let mut error = ValidationError::new("currency_scale");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max_decimals".into(), &CURRENCY_SCALE);
        return Err(error);
    }
    Ok(())
}

/// Valoración de conductor entre 0 y 5
pub fn validate_rating(value: &Decimal) -> Result<(), ValidationError> {
    validate_range(*value, Decimal::ZERO, Decimal::from(5))
}

pub fn validate_category(value: &str) -> Result<(), ValidationError> {
    validate_enum(value.to_lowercase().as_str(), VEHICLE_CATEGORIES)
}

pub fn validate_transmission(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, TRANSMISSIONS)
}

pub fn validate_fuel_type(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, FUEL_TYPES)
}

/// Validar URL de imagen (debe empezar por http)
pub fn validate_image_url(value: &str) -> Result<(), ValidationError> {
    if !value.trim().starts_with("http") {
        let mut error = ValidationError::new("image_url");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
