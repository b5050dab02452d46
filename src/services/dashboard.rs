//! Estadísticas del back office

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::booking::{BookingDetails, BookingStatus, PaymentStatus};
use crate::models::vehicle::Vehicle;
use crate::services::quote::round_money;

const RECENT_BOOKINGS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub total_users: usize,
    pub total_drivers: usize,
    pub total_revenue: Decimal,
    /// Variación porcentual del mes actual frente al anterior
    pub revenue_change: Decimal,
    pub recent_bookings: Vec<BookingDetails>,
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Ingresos: reservas pagadas (las reembolsadas no cuentan)
fn revenue<'a>(bookings: impl Iterator<Item = &'a BookingDetails>) -> Decimal {
    bookings
        .filter(|d| d.booking.payment_status == PaymentStatus::Paid)
        .map(|d| d.booking.total_price)
        .sum()
}

/// `0` si el mes anterior no tuvo ingresos
pub fn revenue_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    round_money((current - previous) / previous * Decimal::ONE_HUNDRED)
}

pub fn compute_dashboard(
    vehicles: &[Vehicle],
    bookings: &[BookingDetails],
    total_users: usize,
    total_drivers: usize,
    today: NaiveDate,
) -> DashboardStats {
    let this_month = (today.year(), today.month());
    let last_month = previous_month(today.year(), today.month());
    let in_month = |d: &&BookingDetails, (year, month): (i32, u32)| {
        let created = d.booking.created_at.date_naive();
        created.year() == year && created.month() == month
    };

    let current = revenue(bookings.iter().filter(|d| in_month(d, this_month)));
    let previous = revenue(bookings.iter().filter(|d| in_month(d, last_month)));

    let mut recent: Vec<BookingDetails> = bookings.to_vec();
    recent.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
    recent.truncate(RECENT_BOOKINGS);

    DashboardStats {
        total_vehicles: vehicles.len(),
        available_vehicles: vehicles.iter().filter(|v| v.available).count(),
        total_bookings: bookings.len(),
        pending_bookings: bookings
            .iter()
            .filter(|d| d.booking.status == BookingStatus::Pending)
            .count(),
        total_users,
        total_drivers,
        total_revenue: round_money(revenue(bookings.iter())),
        revenue_change: revenue_change(current, previous),
        recent_bookings: recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::{DateRange, NewBooking};
    use crate::repositories::fixtures::sample_fleet;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;
    use uuid::Uuid;

    fn details(total: i64, payment_status: PaymentStatus, status: BookingStatus, y: i32, m: u32) -> BookingDetails {
        let pickup = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let booking = NewBooking {
            vehicle_id: Uuid::new_v4(),
            renter_id: Uuid::new_v4(),
            driver_id: None,
            date_range: DateRange::new(pickup, pickup).unwrap(),
            duration_days: 1,
            total_price: Decimal::from(total),
            status,
            payment_status,
            pickup_location: None,
            dropoff_location: None,
            special_requests: None,
        }
        .into_booking(Uuid::new_v4(), Utc.with_ymd_and_hms(y, m, 10, 12, 0, 0).unwrap());
        BookingDetails {
            booking,
            vehicle_name: None,
            renter_name: None,
        }
    }

    #[test]
    fn test_revenue_change() {
        assert_eq!(revenue_change(Decimal::from(1125), Decimal::from(1000)), Decimal::from_str("12.50").unwrap());
        assert_eq!(revenue_change(Decimal::from(500), Decimal::from(1000)), Decimal::from_str("-50.00").unwrap());
        assert_eq!(revenue_change(Decimal::from(500), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_compute_dashboard() {
        let mut fleet = sample_fleet();
        fleet[1].available = false;
        let bookings = vec![
            details(600, PaymentStatus::Paid, BookingStatus::Pending, 2024, 6),
            details(400, PaymentStatus::Paid, BookingStatus::Confirmed, 2024, 5),
            details(900, PaymentStatus::Refunded, BookingStatus::Cancelled, 2024, 6),
            details(100, PaymentStatus::Paid, BookingStatus::Completed, 2024, 1),
        ];

        let stats = compute_dashboard(&fleet, &bookings, 7, 4, NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        assert_eq!(stats.total_vehicles, 6);
        assert_eq!(stats.available_vehicles, 5);
        assert_eq!(stats.total_bookings, 4);
        assert_eq!(stats.pending_bookings, 1);
        assert_eq!(stats.total_revenue, Decimal::from(1100));
        assert_eq!(stats.revenue_change, Decimal::from(50));
        assert_eq!(stats.recent_bookings.len(), 4);
        assert_eq!(stats.recent_bookings[0].booking.created_at.date_naive().month(), 6);
    }

    #[test]
    fn test_january_compares_with_december() {
        let bookings = vec![
            details(200, PaymentStatus::Paid, BookingStatus::Confirmed, 2025, 1),
            details(100, PaymentStatus::Paid, BookingStatus::Completed, 2024, 12),
        ];
        let stats = compute_dashboard(&[], &bookings, 0, 0, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(stats.revenue_change, Decimal::from(100));
    }
}
