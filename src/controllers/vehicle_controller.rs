use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, QuoteQuery, UpdateVehicleRequest};
use crate::models::vehicle::{Vehicle, VehicleFilters};
use crate::repositories::{DriverRepository, VehicleRepository};
use crate::services::filtering::filter_vehicles;
use crate::services::quote::{compute_quote, BookingQuote};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppError, AppResult};
use crate::utils::validation::{validate_date, validate_range};
use validator::{Validate, ValidationErrors};

pub const MIN_VEHICLE_YEAR: i32 = 2000;

pub struct VehicleController {
    vehicles: Arc<dyn VehicleRepository>,
    drivers: Arc<dyn DriverRepository>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            drivers: state.drivers.clone(),
        }
    }

    async fn find(&self, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.list().await?;
        Ok(filter_vehicles(vehicles, filters))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Vehicle> {
        self.find(id).await
    }

    pub async fn quote(&self, id: Uuid, query: &QuoteQuery, today: NaiveDate) -> AppResult<BookingQuote> {
        let vehicle = self.find(id).await?;
        let pickup_date = parse_date("pickup_date", &query.pickup_date)?;
        let return_date = parse_date("return_date", &query.return_date)?;
        Ok(compute_quote(&vehicle, pickup_date, return_date, today)?)
    }

    pub async fn create(&self, request: CreateVehicleRequest, current_year: i32) -> AppResult<ApiResponse<Vehicle>> {
        request.validate().map_err(AppError::Validation)?;
        check_year(request.year, current_year)?;
        self.check_driver(request.driver_id).await?;

        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year,
            daily_rate: request.daily_rate,
            seat_count: request.seat_count,
            transmission: request.transmission,
            fuel_type: request.fuel_type,
            category: request.category.to_lowercase(),
            location: request.location.trim().to_string(),
            description: request.description.trim().to_string(),
            image_url: request.image_url.trim().to_string(),
            features: request.features,
            available: request.available,
            driver_id: request.driver_id,
            created_at: Utc::now(),
        };

        let vehicle = self.vehicles.create(&vehicle).await?;
        info!("🚗 Vehículo creado: {} ({})", vehicle.name, vehicle.id);
        Ok(ApiResponse::success_with_message(vehicle, "Vehicle created successfully"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
        current_year: i32,
    ) -> AppResult<ApiResponse<Vehicle>> {
        request.validate().map_err(AppError::Validation)?;
        let mut vehicle = self.find(id).await?;

        if let Some(year) = request.year {
            check_year(year, current_year)?;
            vehicle.year = year;
        }
        if let Some(driver_id) = request.driver_id {
            self.check_driver(driver_id).await?;
            vehicle.driver_id = driver_id;
        }
        if let Some(name) = request.name {
            vehicle.name = name.trim().to_string();
        }
        if let Some(brand) = request.brand {
            vehicle.brand = brand.trim().to_string();
        }
        if let Some(model) = request.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(daily_rate) = request.daily_rate {
            vehicle.daily_rate = daily_rate;
        }
        if let Some(seat_count) = request.seat_count {
            vehicle.seat_count = seat_count;
        }
        if let Some(transmission) = request.transmission {
            vehicle.transmission = transmission;
        }
        if let Some(fuel_type) = request.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
        if let Some(category) = request.category {
            vehicle.category = category.to_lowercase();
        }
        if let Some(location) = request.location {
            vehicle.location = location.trim().to_string();
        }
        if let Some(description) = request.description {
            vehicle.description = description.trim().to_string();
        }
        if let Some(image_url) = request.image_url {
            vehicle.image_url = image_url.trim().to_string();
        }
        if let Some(features) = request.features {
            vehicle.features = features;
        }
        if let Some(available) = request.available {
            vehicle.available = available;
        }

        let vehicle = self
            .vehicles
            .update(&vehicle)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        Ok(ApiResponse::success_with_message(vehicle, "Vehicle updated successfully"))
    }

    pub async fn set_availability(&self, id: Uuid, available: bool) -> AppResult<Vehicle> {
        let mut vehicle = self.find(id).await?;
        vehicle.available = available;
        let vehicle = self
            .vehicles
            .update(&vehicle)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;
        info!("🔁 Disponibilidad de {} = {}", vehicle.name, vehicle.available);
        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.vehicles.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }

    async fn check_driver(&self, driver_id: Option<Uuid>) -> AppResult<()> {
        if let Some(driver_id) = driver_id {
            if self.drivers.find_by_id(driver_id).await?.is_none() {
                return Err(validation_error("driver_id", "Assigned driver does not exist"));
            }
        }
        Ok(())
    }
}

/// Año entre 2000 y el año próximo
fn check_year(year: i32, current_year: i32) -> AppResult<()> {
    validate_range(year, MIN_VEHICLE_YEAR, current_year + 1).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("year", e);
        AppError::Validation(errors)
    })
}

pub(crate) fn parse_date(field: &'static str, value: &str) -> AppResult<NaiveDate> {
    validate_date(value).map_err(|_| validation_error(field, "Date must use the YYYY-MM-DD format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_year_bounds() {
        assert!(check_year(2000, 2026).is_ok());
        assert!(check_year(2027, 2026).is_ok());
        assert!(check_year(2028, 2026).is_err());
        assert!(check_year(1999, 2026).is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("pickup_date", "2024-06-01").is_ok());
        assert!(matches!(parse_date("pickup_date", "06/01/2024"), Err(AppError::Validation(_))));
    }
}
