use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::DriverRepository;
use crate::models::driver::Driver;
use crate::utils::errors::AppResult;

const DRIVER_COLUMNS: &str = "id, name, email, phone, license_number, experience_years, rating, \
     available, image_url, specialties, created_at";

pub struct PgDriverRepository {
    pool: PgPool,
}

impl PgDriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DriverRepository for PgDriverRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        let driver = sqlx::query_as::<_, Driver>(&format!(
            "SELECT {} FROM drivers WHERE id = $1",
            DRIVER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(driver)
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        let drivers = sqlx::query_as::<_, Driver>(&format!(
            "SELECT {} FROM drivers ORDER BY name ASC",
            DRIVER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        let created = sqlx::query_as::<_, Driver>(&format!(
            r#"
            INSERT INTO drivers ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            DRIVER_COLUMNS, DRIVER_COLUMNS
        ))
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.email)
        .bind(&driver.phone)
        .bind(&driver.license_number)
        .bind(driver.experience_years)
        .bind(driver.rating)
        .bind(driver.available)
        .bind(&driver.image_url)
        .bind(&driver.specialties)
        .bind(driver.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>> {
        let updated = sqlx::query_as::<_, Driver>(&format!(
            r#"
            UPDATE drivers
            SET name = $2, email = $3, phone = $4, license_number = $5, experience_years = $6,
                rating = $7, available = $8, image_url = $9, specialties = $10
            WHERE id = $1
            RETURNING {}
            "#,
            DRIVER_COLUMNS
        ))
        .bind(driver.id)
        .bind(&driver.name)
        .bind(&driver.email)
        .bind(&driver.phone)
        .bind(&driver.license_number)
        .bind(driver.experience_years)
        .bind(driver.rating)
        .bind(driver.available)
        .bind(&driver.image_url)
        .bind(&driver.specialties)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
