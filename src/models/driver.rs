//! Modelo de Driver
//!
//! Conductores que pueden asignarse a vehículos y reservas.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub experience_years: i32,
    pub rating: Decimal,
    pub available: bool,
    pub image_url: Option<String>,
    pub specialties: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
            || self.license_number.to_lowercase().contains(&query)
            || self
                .specialties
                .iter()
                .any(|s| s.to_lowercase().contains(&query))
    }
}

/// Filtros para el listado de conductores
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriverFilters {
    pub search: Option<String>,
    #[serde(default)]
    pub available_only: bool,
}
