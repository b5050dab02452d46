use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::models::driver::{Driver, DriverFilters};
use crate::repositories::DriverRepository;
use crate::services::filtering::filter_drivers;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct DriverController {
    drivers: Arc<dyn DriverRepository>,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            drivers: state.drivers.clone(),
        }
    }

    pub async fn list(&self, filters: &DriverFilters) -> AppResult<Vec<Driver>> {
        Ok(filter_drivers(self.drivers.list().await?, filters))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Driver> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<ApiResponse<Driver>> {
        request.validate().map_err(AppError::Validation)?;

        let driver = Driver {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            phone: request.phone.trim().to_string(),
            license_number: request.license_number.trim().to_string(),
            experience_years: request.experience_years,
            rating: request.rating,
            available: request.available,
            image_url: request.image_url,
            specialties: request.specialties,
            created_at: Utc::now(),
        };

        let driver = self.drivers.create(&driver).await?;
        info!("🧑‍✈️ Conductor creado: {} ({})", driver.name, driver.id);
        Ok(ApiResponse::success_with_message(driver, "Driver created successfully"))
    }

    pub async fn update(&self, id: Uuid, request: UpdateDriverRequest) -> AppResult<ApiResponse<Driver>> {
        request.validate().map_err(AppError::Validation)?;
        let mut driver = self.get(id).await?;

        if let Some(name) = request.name {
            driver.name = name.trim().to_string();
        }
        if let Some(email) = request.email {
            driver.email = email.trim().to_lowercase();
        }
        if let Some(phone) = request.phone {
            driver.phone = phone.trim().to_string();
        }
        if let Some(license_number) = request.license_number {
            driver.license_number = license_number.trim().to_string();
        }
        if let Some(experience_years) = request.experience_years {
            driver.experience_years = experience_years;
        }
        if let Some(rating) = request.rating {
            driver.rating = rating;
        }
        if let Some(available) = request.available {
            driver.available = available;
        }
        if request.image_url.is_some() {
            driver.image_url = request.image_url;
        }
        if let Some(specialties) = request.specialties {
            driver.specialties = specialties;
        }

        let driver = self
            .drivers
            .update(&driver)
            .await?
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))?;
        Ok(ApiResponse::success_with_message(driver, "Driver updated successfully"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.drivers.delete(id).await? {
            return Err(not_found_error("Driver", &id.to_string()));
        }
        info!("🗑️ Conductor eliminado: {}", id);
        Ok(())
    }
}
