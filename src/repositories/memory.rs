//! Almacén en memoria
//!
//! Implementa los cuatro repositorios sobre `HashMap`s protegidos con
//! `RwLock`. Se usa cuando no hay `DATABASE_URL` y en los tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use super::{BookingRepository, DriverRepository, UserRepository, VehicleRepository};
use crate::models::booking::{Booking, NewBooking};
use crate::models::driver::Driver;
use crate::models::user::User;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::{conflict_error, AppError, AppResult};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    vehicles: Arc<RwLock<HashMap<Uuid, Vehicle>>>,
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
    drivers: Arc<RwLock<HashMap<Uuid, Driver>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

fn read<T>(lock: &RwLock<T>) -> AppResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| AppError::Internal(format!("Failed to acquire read lock: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> AppResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| AppError::Internal(format!("Failed to acquire write lock: {}", e)))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(read(&self.vehicles)?.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = read(&self.vehicles)?.values().cloned().collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vehicles)
    }

    async fn create(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = write(&self.vehicles)?;
        if vehicles.contains_key(&vehicle.id) {
            return Err(conflict_error("Vehicle", "id", &vehicle.id.to_string()));
        }
        vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Option<Vehicle>> {
        let mut vehicles = write(&self.vehicles)?;
        match vehicles.get_mut(&vehicle.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = Vehicle {
                    created_at,
                    ..vehicle.clone()
                };
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(write(&self.vehicles)?.remove(&id).is_some())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let booking = booking.into_booking(Uuid::new_v4(), Utc::now());
        write(&self.bookings)?.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(read(&self.bookings)?.get(&id).cloned())
    }

    async fn list_by_renter(&self, renter_id: Uuid) -> AppResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = read(&self.bookings)?
            .values()
            .filter(|b| b.renter_id == renter_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn list_all(&self) -> AppResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = read(&self.bookings)?.values().cloned().collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn update_status(&self, booking: &Booking) -> AppResult<Option<Booking>> {
        let mut bookings = write(&self.bookings)?;
        match bookings.get_mut(&booking.id) {
            Some(existing) => {
                existing.status = booking.status;
                existing.payment_status = booking.payment_status;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl DriverRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        Ok(read(&self.drivers)?.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Driver>> {
        let mut drivers: Vec<Driver> = read(&self.drivers)?.values().cloned().collect();
        drivers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(drivers)
    }

    async fn create(&self, driver: &Driver) -> AppResult<Driver> {
        write(&self.drivers)?.insert(driver.id, driver.clone());
        Ok(driver.clone())
    }

    async fn update(&self, driver: &Driver) -> AppResult<Option<Driver>> {
        let mut drivers = write(&self.drivers)?;
        match drivers.get_mut(&driver.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = Driver {
                    created_at,
                    ..driver.clone()
                };
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let removed = write(&self.drivers)?.remove(&id).is_some();
        if removed {
            // ON DELETE SET NULL
            for vehicle in write(&self.vehicles)?.values_mut() {
                if vehicle.driver_id == Some(id) {
                    vehicle.driver_id = None;
                }
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(read(&self.users)?.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(read(&self.users)?
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let mut users = write(&self.users)?;
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<Option<User>> {
        let mut users = write(&self.users)?;
        match users.get_mut(&user.id) {
            Some(existing) => {
                existing.name = user.name.clone();
                existing.phone = user.phone.clone();
                existing.address = user.address.clone();
                existing.profile_image = user.profile_image.clone();
                existing.is_admin = user.is_admin;
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = read(&self.users)?.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::{BookingStatus, DateRange, PaymentStatus};
    use crate::repositories::fixtures::{sample_drivers, sample_vehicle};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn new_booking(renter_id: Uuid) -> NewBooking {
        let pickup = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        NewBooking {
            vehicle_id: Uuid::new_v4(),
            renter_id,
            driver_id: None,
            date_range: DateRange::new(pickup, pickup).unwrap(),
            duration_days: 1,
            total_price: Decimal::new(29900, 2),
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Paid,
            pickup_location: None,
            dropoff_location: None,
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn test_vehicle_crud() {
        let store = InMemoryStore::new();
        let vehicle = sample_vehicle();
        VehicleRepository::create(&store, &vehicle).await.unwrap();
        assert!(VehicleRepository::create(&store, &vehicle).await.is_err());

        let mut changed = vehicle.clone();
        changed.available = false;
        let updated = VehicleRepository::update(&store, &changed).await.unwrap().unwrap();
        assert!(!updated.available);

        assert!(VehicleRepository::delete(&store, vehicle.id).await.unwrap());
        assert!(VehicleRepository::find_by_id(&store, vehicle.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bookings_listed_per_renter() {
        let store = InMemoryStore::new();
        let renter = Uuid::new_v4();
        BookingRepository::create(&store, new_booking(renter)).await.unwrap();
        BookingRepository::create(&store, new_booking(Uuid::new_v4())).await.unwrap();

        assert_eq!(store.list_by_renter(renter).await.unwrap().len(), 1);
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_deleting_driver_unassigns_vehicle() {
        let store = InMemoryStore::new();
        let driver = sample_drivers().remove(0);
        let mut vehicle = sample_vehicle();
        vehicle.driver_id = Some(driver.id);
        DriverRepository::create(&store, &driver).await.unwrap();
        VehicleRepository::create(&store, &vehicle).await.unwrap();

        assert!(DriverRepository::delete(&store, driver.id).await.unwrap());
        let vehicle = VehicleRepository::find_by_id(&store, vehicle.id).await.unwrap().unwrap();
        assert_eq!(vehicle.driver_id, None);
    }
}
