//! Modelo de Vehicle
//!
//! Vehículo del catálogo de alquiler. Mapea la tabla `vehicles`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub daily_rate: Decimal,
    pub seat_count: i32,
    pub transmission: String,
    pub fuel_type: String,
    pub category: String,
    pub location: String,
    pub description: String,
    pub image_url: String,
    pub features: Vec<String>,
    pub available: bool,
    pub driver_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Nombre para mostrar, p.ej. "Jeep Wrangler (2023)"
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }

    /// Búsqueda libre, sin distinguir mayúsculas, sobre nombre, marca, modelo y descripción
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.name, &self.brand, &self.model, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub available_only: bool,
}
