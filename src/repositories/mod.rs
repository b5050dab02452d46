//! Repositorios
//!
//! Interfaces con el almacén de documentos/relacional. Cada trait tiene una
//! implementación PostgreSQL (`Pg*Repository`) y una en memoria
//! (`InMemoryStore`) que además sirve como mecanismo de fixtures.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::booking::{Booking, NewBooking};
use crate::models::driver::Driver;
use crate::models::user::User;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppResult;

pub mod booking_repository;
pub mod driver_repository;
pub mod fixtures;
pub mod memory;
pub mod user_repository;
pub mod vehicle_repository;

pub use booking_repository::PgBookingRepository;
pub use driver_repository::PgDriverRepository;
pub use memory::InMemoryStore;
pub use user_repository::PgUserRepository;
pub use vehicle_repository::PgVehicleRepository;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;
    async fn list(&self) -> AppResult<Vec<Vehicle>>;
    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;
    /// Reemplaza todos los campos editables; `None` si no existe
    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>>;
    /// `true` si existía
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistencia de reservas; desde el checkout es sólo de inserción
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;
    async fn list_by_renter(&self, renter_id: Uuid) -> AppResult<Vec<Booking>>;
    async fn list_all(&self) -> AppResult<Vec<Booking>>;
    /// Persiste `status` y `payment_status`; `None` si no existe
    async fn update_status(&self, booking: &Booking) -> AppResult<Option<Booking>>;
}

#[async_trait]
pub trait DriverRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>>;
    async fn list(&self) -> AppResult<Vec<Driver>>;
    async fn create(&self, driver: &Driver) -> AppResult<Driver>;
    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>>;
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn create(&self, user: &User) -> AppResult<User>;
    async fn update(&self, user: &User) -> AppResult<Option<User>>;
    async fn list(&self) -> AppResult<Vec<User>>;
}
