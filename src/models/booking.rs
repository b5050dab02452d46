//! Modelo de Booking
//!
//! Reservas confirmadas, sus estados y las transiciones permitidas.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::BookingError;

/// Estado de la reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// pending → confirmed|cancelled; confirmed → completed|cancelled
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }
}

/// Estado del pago de la reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Paid) | (PaymentStatus::Paid, PaymentStatus::Refunded)
        )
    }
}

/// Rango de fechas de calendario (sin hora)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl DateRange {
    /// Construye el rango; falla si la devolución es anterior a la recogida
    pub fn new(pickup_date: NaiveDate, return_date: NaiveDate) -> Result<Self, BookingError> {
        if return_date < pickup_date {
            return Err(BookingError::InvalidDateRange);
        }
        Ok(Self {
            pickup_date,
            return_date,
        })
    }

    /// Días entre fechas, con un mínimo de 1 día facturable
    pub fn chargeable_days(&self) -> i64 {
        (self.return_date - self.pickup_date).num_days().max(1)
    }
}

/// Reserva persistida
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub renter_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub duration_days: i64,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Aplica una transición de estado. Cancelar una reserva pagada la marca como reembolsada.
    pub fn with_status(mut self, next: BookingStatus) -> Result<Self, BookingError> {
        if !self.status.can_transition_to(next) {
            return Err(BookingError::InvalidTransition(format!(
                "booking status {} -> {}",
                self.status.as_str(),
                next.as_str()
            )));
        }
        if next == BookingStatus::Cancelled && self.payment_status == PaymentStatus::Paid {
            self.payment_status = PaymentStatus::Refunded;
        }
        self.status = next;
        Ok(self)
    }

    pub fn with_payment_status(mut self, next: PaymentStatus) -> Result<Self, BookingError> {
        if !self.payment_status.can_transition_to(next) {
            return Err(BookingError::InvalidTransition(format!(
                "payment status {} -> {}",
                self.payment_status.as_str(),
                next.as_str()
            )));
        }
        self.payment_status = next;
        Ok(self)
    }
}

/// Reserva lista para persistir (sin id ni fecha de creación)
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub vehicle_id: Uuid,
    pub renter_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub date_range: DateRange,
    pub duration_days: i64,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub special_requests: Option<String>,
}

impl NewBooking {
    pub fn into_booking(self, id: Uuid, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            vehicle_id: self.vehicle_id,
            renter_id: self.renter_id,
            driver_id: self.driver_id,
            pickup_date: self.date_range.pickup_date,
            return_date: self.date_range.return_date,
            duration_days: self.duration_days,
            total_price: self.total_price,
            status: self.status,
            payment_status: self.payment_status,
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            special_requests: self.special_requests,
            created_at,
        }
    }
}

/// Reserva con los nombres que muestran los listados
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub vehicle_name: Option<String>,
    pub renter_name: Option<String>,
}

impl BookingDetails {
    /// Búsqueda sobre nombre del renter, lugar de recogida y nombre del vehículo
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [
            self.renter_name.as_deref(),
            self.booking.pickup_location.as_deref(),
            self.vehicle_name.as_deref(),
        ]
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Pestañas de "mis reservas"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingTab {
    Upcoming,
    Completed,
    Cancelled,
}

impl BookingTab {
    pub fn includes(&self, status: BookingStatus) -> bool {
        match self {
            BookingTab::Upcoming => matches!(status, BookingStatus::Pending | BookingStatus::Confirmed),
            BookingTab::Completed => status == BookingStatus::Completed,
            BookingTab::Cancelled => status == BookingStatus::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(status: BookingStatus, payment_status: PaymentStatus) -> Booking {
        NewBooking {
            vehicle_id: Uuid::new_v4(),
            renter_id: Uuid::new_v4(),
            driver_id: None,
            date_range: DateRange::new(date(2024, 6, 1), date(2024, 6, 5)).unwrap(),
            duration_days: 4,
            total_price: Decimal::new(60000, 2),
            status,
            payment_status,
            pickup_location: None,
            dropoff_location: None,
            special_requests: None,
        }
        .into_booking(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_status_round_trip_strings() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::from_str("archived"), None);
    }

    #[test]
    fn test_terminal_statuses_have_no_exit() {
        for next in [BookingStatus::Pending, BookingStatus::Confirmed, BookingStatus::Completed] {
            assert!(!BookingStatus::Cancelled.can_transition_to(next));
            assert!(!BookingStatus::Completed.can_transition_to(next));
        }
    }

    #[test]
    fn test_pending_cannot_jump_to_completed() {
        let result = booking(BookingStatus::Pending, PaymentStatus::Paid).with_status(BookingStatus::Completed);
        assert!(matches!(result, Err(BookingError::InvalidTransition(_))));
    }

    #[test]
    fn test_cancelling_paid_booking_refunds() {
        let cancelled = booking(BookingStatus::Confirmed, PaymentStatus::Paid)
            .with_status(BookingStatus::Cancelled)
            .unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(cancelled.payment_status, PaymentStatus::Refunded);
    }

    #[test]
    fn test_cancelling_unpaid_booking_keeps_payment_pending() {
        let cancelled = booking(BookingStatus::Pending, PaymentStatus::Pending)
            .with_status(BookingStatus::Cancelled)
            .unwrap();
        assert_eq!(cancelled.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_payment_transitions() {
        let b = booking(BookingStatus::Pending, PaymentStatus::Pending);
        let paid = b.with_payment_status(PaymentStatus::Paid).unwrap();
        assert!(paid.clone().with_payment_status(PaymentStatus::Pending).is_err());
        assert_eq!(
            paid.with_payment_status(PaymentStatus::Refunded).unwrap().payment_status,
            PaymentStatus::Refunded
        );
    }

    #[test]
    fn test_date_range_rejects_inverted_dates() {
        assert_eq!(
            DateRange::new(date(2024, 6, 10), date(2024, 6, 5)),
            Err(BookingError::InvalidDateRange)
        );
    }

    #[test]
    fn test_same_day_range_charges_one_day() {
        let range = DateRange::new(date(2024, 6, 1), date(2024, 6, 1)).unwrap();
        assert_eq!(range.chargeable_days(), 1);
    }

    #[test]
    fn test_booking_tabs() {
        assert!(BookingTab::Upcoming.includes(BookingStatus::Pending));
        assert!(BookingTab::Upcoming.includes(BookingStatus::Confirmed));
        assert!(!BookingTab::Upcoming.includes(BookingStatus::Completed));
        assert!(BookingTab::Cancelled.includes(BookingStatus::Cancelled));
    }
}
