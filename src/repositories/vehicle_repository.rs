use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::VehicleRepository;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{AppError, AppResult};

const VEHICLE_COLUMNS: &str = "id, name, brand, model, year, daily_rate, seat_count, transmission, \
     fuel_type, category, location, description, image_url, features, available, driver_id, created_at";

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles ORDER BY name ASC",
            VEHICLE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let created = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS, VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.daily_rate)
        .bind(vehicle.seat_count)
        .bind(&vehicle.transmission)
        .bind(&vehicle.fuel_type)
        .bind(&vehicle.category)
        .bind(&vehicle.location)
        .bind(&vehicle.description)
        .bind(&vehicle.image_url)
        .bind(&vehicle.features)
        .bind(vehicle.available)
        .bind(vehicle.driver_id)
        .bind(vehicle.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Error creating vehicle: {}", e)))?;

        Ok(created)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let updated = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET name = $2, brand = $3, model = $4, year = $5, daily_rate = $6, seat_count = $7,
                transmission = $8, fuel_type = $9, category = $10, location = $11, description = $12,
                image_url = $13, features = $14, available = $15, driver_id = $16
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(vehicle.id)
        .bind(&vehicle.name)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.daily_rate)
        .bind(vehicle.seat_count)
        .bind(&vehicle.transmission)
        .bind(&vehicle.fuel_type)
        .bind(&vehicle.category)
        .bind(&vehicle.location)
        .bind(&vehicle.description)
        .bind(&vehicle.image_url)
        .bind(&vehicle.features)
        .bind(vehicle.available)
        .bind(vehicle.driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
