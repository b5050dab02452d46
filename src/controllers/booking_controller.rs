use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::dto::booking_dto::AdminBookingsQuery;
use crate::models::auth::RenterIdentity;
use crate::models::booking::{Booking, BookingDetails, BookingStatus, BookingTab, PaymentStatus};
use crate::repositories::{BookingRepository, UserRepository, VehicleRepository};
use crate::services::filtering::{bookings_for_tab, filter_admin_bookings};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, forbidden_error, not_found_error, AppResult, BookingError};

pub struct BookingController {
    bookings: Arc<dyn BookingRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    users: Arc<dyn UserRepository>,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            bookings: state.bookings.clone(),
            vehicles: state.vehicles.clone(),
            users: state.users.clone(),
        }
    }

    async fn find(&self, id: Uuid) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))
    }

    /// Añade nombres de vehículo y renter
    pub async fn with_details(&self, bookings: Vec<Booking>) -> AppResult<Vec<BookingDetails>> {
        let vehicle_names: HashMap<Uuid, String> = self
            .vehicles
            .list()
            .await?
            .into_iter()
            .map(|v| (v.id, v.name))
            .collect();
        let renter_names: HashMap<Uuid, String> = self
            .users
            .list()
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| BookingDetails {
                vehicle_name: vehicle_names.get(&booking.vehicle_id).cloned(),
                renter_name: renter_names.get(&booking.renter_id).cloned(),
                booking,
            })
            .collect())
    }

    pub async fn my_bookings(&self, renter_id: Uuid, tab: Option<BookingTab>) -> AppResult<Vec<BookingDetails>> {
        let bookings = bookings_for_tab(self.bookings.list_by_renter(renter_id).await?, tab);
        self.with_details(bookings).await
    }

    pub async fn get(&self, id: Uuid, identity: &RenterIdentity) -> AppResult<BookingDetails> {
        let renter_id = identity.current_renter_id()?;
        let booking = self.find(id).await?;
        if booking.renter_id != renter_id && !identity.is_admin() {
            return Err(forbidden_error("view booking", "it belongs to another renter"));
        }
        let mut details = self.with_details(vec![booking]).await?;
        details
            .pop()
            .ok_or_else(|| not_found_error("Booking", &id.to_string()))
    }

    /// Cancelación por el propio renter (sólo pendientes o confirmadas)
    pub async fn cancel(&self, id: Uuid, renter_id: Uuid) -> AppResult<Booking> {
        let booking = self.find(id).await?;
        if booking.renter_id != renter_id {
            return Err(forbidden_error("cancel booking", "it belongs to another renter"));
        }
        let cancelled = booking.with_status(BookingStatus::Cancelled)?;
        let saved = self.save(cancelled).await?;
        info!("❌ Reserva {} cancelada por su renter", saved.id);
        Ok(saved)
    }

    pub async fn admin_list(&self, query: &AdminBookingsQuery) -> AppResult<Vec<BookingDetails>> {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                BookingStatus::from_str(raw)
                    .ok_or_else(|| bad_request_error(&format!("Unknown booking status '{}'", raw)))?,
            ),
        };
        let details = self.with_details(self.bookings.list_all().await?).await?;
        Ok(filter_admin_bookings(details, status, query.search.as_deref()))
    }

    pub async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        let booking = self.find(id).await?.with_status(status)?;
        let saved = self.save(booking).await?;
        info!("📋 Reserva {} → {}", saved.id, saved.status.as_str());
        Ok(saved)
    }

    pub async fn update_payment_status(&self, id: Uuid, payment_status: PaymentStatus) -> AppResult<Booking> {
        let booking = self.find(id).await?.with_payment_status(payment_status)?;
        let saved = self.save(booking).await?;
        info!("💰 Pago de reserva {} → {}", saved.id, saved.payment_status.as_str());
        Ok(saved)
    }

    async fn save(&self, booking: Booking) -> AppResult<Booking> {
        let id = booking.id;
        self.bookings
            .update_status(&booking)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Booking {} not found", id)).into())
    }
}
