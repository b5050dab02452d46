//! Flujo de checkout de una reserva
//!
//! Máquina de estados lineal `Summary → Payment → Confirmed`. Cada
//! instancia es independiente; la única operación con efectos es `confirm`,
//! que persiste la reserva.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::auth::RenterIdentity;
use crate::models::booking::{Booking, BookingStatus, NewBooking, PaymentStatus};
use crate::models::payment::PaymentMethodToken;
use crate::models::vehicle::Vehicle;
use crate::repositories::{BookingRepository, VehicleRepository};
use crate::services::quote::{compute_quote, BookingQuote};
use crate::utils::errors::BookingError;

/// Paso actual del checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CheckoutStep {
    Summary,
    Payment,
    Confirmed { booking_id: Uuid },
}

impl CheckoutStep {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutStep::Summary => "summary",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmed { .. } => "confirmed",
        }
    }
}

/// Detalles opcionales del viaje
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDetails {
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingFlow {
    vehicle: Vehicle,
    step: CheckoutStep,
    pickup_date: Option<NaiveDate>,
    return_date: Option<NaiveDate>,
    trip: TripDetails,
    renter_id: Option<Uuid>,
    quote: Option<BookingQuote>,
    payment_method: Option<PaymentMethodToken>,
}

impl BookingFlow {
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            step: CheckoutStep::Summary,
            pickup_date: None,
            return_date: None,
            trip: TripDetails::default(),
            renter_id: None,
            quote: None,
            payment_method: None,
        }
    }

    /// Busca el vehículo y abre un flujo en `Summary`
    pub async fn start(vehicle_id: Uuid, vehicles: &dyn VehicleRepository) -> Result<Self, BookingError> {
        let vehicle = vehicles
            .find_by_id(vehicle_id)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?
            .ok_or_else(|| BookingError::NotFound(format!("Vehicle {} not found", vehicle_id)))?;

        Ok(Self::new(vehicle))
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn pickup_date(&self) -> Option<NaiveDate> {
        self.pickup_date
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    pub fn trip(&self) -> &TripDetails {
        &self.trip
    }

    /// Renter que pasó a pago (dueño del flujo desde ese momento)
    pub fn renter_id(&self) -> Option<Uuid> {
        self.renter_id
    }

    /// Cotización congelada al pasar a pago
    pub fn quote(&self) -> Option<&BookingQuote> {
        self.quote.as_ref()
    }

    pub fn payment_method(&self) -> Option<&PaymentMethodToken> {
        self.payment_method.as_ref()
    }

    fn require_step(&self, expected: CheckoutStep, operation: &str) -> Result<(), BookingError> {
        if self.step != expected {
            return Err(BookingError::InvalidTransition(format!(
                "{} is not allowed in step {}",
                operation,
                self.step.name()
            )));
        }
        Ok(())
    }

    /// Fija las fechas; `None` deja la fecha sin definir
    pub fn set_dates(
        &mut self,
        pickup_date: Option<NaiveDate>,
        return_date: Option<NaiveDate>,
    ) -> Result<(), BookingError> {
        self.require_step(CheckoutStep::Summary, "set_dates")?;
        self.pickup_date = pickup_date;
        self.return_date = return_date;
        Ok(())
    }

    pub fn set_trip_details(&mut self, trip: TripDetails) -> Result<(), BookingError> {
        self.require_step(CheckoutStep::Summary, "set_trip_details")?;
        self.trip = trip;
        Ok(())
    }

    /// Sustituye el vehículo por su versión más reciente antes de pasar a pago
    pub fn refresh_vehicle(&mut self, vehicle: Vehicle) -> Result<(), BookingError> {
        self.require_step(CheckoutStep::Summary, "refresh_vehicle")?;
        if vehicle.id == self.vehicle.id {
            self.vehicle = vehicle;
        }
        Ok(())
    }

    /// Vista previa de la cotización; `Ok(None)` mientras falte alguna fecha
    pub fn preview_quote(&self, today: NaiveDate) -> Result<Option<BookingQuote>, BookingError> {
        match (self.pickup_date, self.return_date) {
            (Some(pickup), Some(ret)) => compute_quote(&self.vehicle, pickup, ret, today).map(Some),
            _ => Ok(None),
        }
    }

    /// `Summary → Payment`
    pub fn proceed_to_payment(
        &mut self,
        identity: &RenterIdentity,
        today: NaiveDate,
    ) -> Result<&BookingQuote, BookingError> {
        self.require_step(CheckoutStep::Summary, "proceed_to_payment")?;

        let renter_id = identity.current_renter_id()?;

        if !self.vehicle.available {
            return Err(BookingError::VehicleUnavailable);
        }

        let pickup_date = self
            .pickup_date
            .ok_or_else(|| BookingError::validation("pickup_date", "Please select a pickup date"))?;
        let return_date = self
            .return_date
            .ok_or_else(|| BookingError::validation("return_date", "Please select a return date"))?;

        let quote = compute_quote(&self.vehicle, pickup_date, return_date, today)?;

        self.renter_id = Some(renter_id);
        self.step = CheckoutStep::Payment;
        Ok(self.quote.insert(quote))
    }

    pub fn select_payment_method(&mut self, token: PaymentMethodToken) -> Result<(), BookingError> {
        self.require_step(CheckoutStep::Payment, "select_payment_method")?;
        self.payment_method = Some(token);
        Ok(())
    }

    /// `Payment → Summary`; descarta el método de pago y la cotización
    pub fn back_to_summary(&mut self) -> Result<(), BookingError> {
        self.require_step(CheckoutStep::Payment, "back_to_summary")?;
        self.payment_method = None;
        self.quote = None;
        self.step = CheckoutStep::Summary;
        Ok(())
    }

    /// `Payment → Confirmed`. Si la persistencia falla el flujo sigue en `Payment`.
    pub async fn confirm(&mut self, bookings: &dyn BookingRepository) -> Result<Booking, BookingError> {
        self.require_step(CheckoutStep::Payment, "confirm")?;

        if self.payment_method.is_none() {
            return Err(BookingError::validation(
                "payment_method",
                "Please select or add a payment method",
            ));
        }

        let (quote, renter_id) = match (&self.quote, self.renter_id) {
            (Some(quote), Some(renter_id)) => (quote.clone(), renter_id),
            _ => {
                return Err(BookingError::InvalidTransition(
                    "payment step has no quote snapshot".to_string(),
                ))
            }
        };

        let new_booking = NewBooking {
            vehicle_id: quote.vehicle_id,
            renter_id,
            driver_id: self.vehicle.driver_id,
            date_range: quote.date_range,
            duration_days: quote.duration_days,
            total_price: quote.total_price,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Paid,
            pickup_location: self.trip.pickup_location.clone(),
            dropoff_location: self.trip.dropoff_location.clone(),
            special_requests: self.trip.special_requests.clone(),
        };

        match bookings.create(new_booking).await {
            Ok(booking) => {
                info!(
                    "✅ Reserva {} confirmada: vehículo {} para renter {}, total {}",
                    booking.id, booking.vehicle_id, booking.renter_id, booking.total_price
                );
                self.step = CheckoutStep::Confirmed {
                    booking_id: booking.id,
                };
                Ok(booking)
            }
            Err(e) => {
                warn!("⚠️ No se pudo persistir la reserva: {}", e);
                Err(BookingError::Persistence(e.to_string()))
            }
        }
    }
}
