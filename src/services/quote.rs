//! Cálculo de cotizaciones de alquiler
//!
//! Duración en días y precio total a partir de un rango de fechas de
//! calendario. Función pura: la fecha de evaluación (`today`) la aporta el
//! llamador.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use uuid::Uuid;

use crate::models::booking::DateRange;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::BookingError;

/// Decimales de la unidad monetaria
pub const CURRENCY_SCALE: u32 = 2;

/// Cotización derivada; no se persiste
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingQuote {
    pub vehicle_id: Uuid,
    pub date_range: DateRange,
    pub duration_days: i64,
    pub daily_rate: Decimal,
    pub total_price: Decimal,
}

/// Redondeo a la unidad menor de la moneda, mitad hacia arriba
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// Calcula la cotización para `vehicle` entre `pickup_date` y `return_date`.
///
/// Errores, en este orden:
/// - `InvalidDateRange` si la devolución es anterior a la recogida
/// - `PastDate` si la recogida es anterior a `today`
/// - `Validation(daily_rate)` si la tarifa del vehículo no es positiva
pub fn compute_quote(
    vehicle: &Vehicle,
    pickup_date: NaiveDate,
    return_date: NaiveDate,
    today: NaiveDate,
) -> Result<BookingQuote, BookingError> {
    let date_range = DateRange::new(pickup_date, return_date)?;

    if pickup_date < today {
        return Err(BookingError::PastDate);
    }

    if vehicle.daily_rate <= Decimal::ZERO {
        return Err(BookingError::validation(
            "daily_rate",
            "Daily rate must be greater than 0",
        ));
    }

    let duration_days = date_range.chargeable_days();
    let total_price = vehicle
        .daily_rate
        .checked_mul(Decimal::from(duration_days))
        .map(round_money)
        .ok_or_else(|| BookingError::validation("daily_rate", "Total price is out of range"))?;

    Ok(BookingQuote {
        vehicle_id: vehicle.id,
        date_range,
        duration_days,
        daily_rate: vehicle.daily_rate,
        total_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::fixtures::sample_vehicle;
    use chrono::Duration;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vehicle_with_rate(rate: &str) -> Vehicle {
        let mut vehicle = sample_vehicle();
        vehicle.daily_rate = Decimal::from_str(rate).unwrap();
        vehicle
    }

    #[test]
    fn test_scenario_a_four_days() {
        let vehicle = vehicle_with_rate("150");
        let quote = compute_quote(&vehicle, date(2024, 6, 1), date(2024, 6, 5), date(2024, 6, 1)).unwrap();
        assert_eq!(quote.duration_days, 4);
        assert_eq!(quote.total_price, Decimal::from(600));
        assert_eq!(quote.total_price.to_string(), "600.00");
    }

    #[test]
    fn test_scenario_b_same_day_is_one_day() {
        let vehicle = vehicle_with_rate("89.5");
        let quote = compute_quote(&vehicle, date(2024, 6, 1), date(2024, 6, 1), date(2024, 5, 20)).unwrap();
        assert_eq!(quote.duration_days, 1);
        assert_eq!(quote.total_price.to_string(), "89.50");
    }

    #[test]
    fn test_scenario_c_inverted_range() {
        let vehicle = vehicle_with_rate("150");
        let result = compute_quote(&vehicle, date(2024, 6, 10), date(2024, 6, 5), date(2024, 6, 1));
        assert_eq!(result, Err(BookingError::InvalidDateRange));
    }

    #[test]
    fn test_inverted_range_is_reported_before_past_date() {
        let vehicle = vehicle_with_rate("150");
        let result = compute_quote(&vehicle, date(2024, 6, 10), date(2024, 6, 5), date(2025, 1, 1));
        assert_eq!(result, Err(BookingError::InvalidDateRange));
    }

    #[test]
    fn test_past_pickup_rejected() {
        let vehicle = vehicle_with_rate("150");
        let today = date(2024, 6, 2);
        for back in 1..30 {
            let pickup = today - Duration::days(back);
            let result = compute_quote(&vehicle, pickup, today + Duration::days(3), today);
            assert_eq!(result, Err(BookingError::PastDate));
        }
    }

    #[test]
    fn test_pickup_today_is_allowed() {
        let vehicle = vehicle_with_rate("150");
        let today = date(2024, 6, 2);
        assert!(compute_quote(&vehicle, today, today, today).is_ok());
    }

    #[test]
    fn test_every_inverted_range_fails() {
        let vehicle = vehicle_with_rate("42.10");
        let pickup = date(2024, 7, 15);
        for back in 1..60 {
            let result = compute_quote(&vehicle, pickup, pickup - Duration::days(back), date(2024, 1, 1));
            assert_eq!(result, Err(BookingError::InvalidDateRange));
        }
    }

    #[test]
    fn test_total_is_exact_product_and_idempotent() {
        let vehicle = vehicle_with_rate("33.33");
        let pickup = date(2024, 6, 1);
        for days in 0..120 {
            let return_date = pickup + Duration::days(days);
            let first = compute_quote(&vehicle, pickup, return_date, pickup).unwrap();
            let second = compute_quote(&vehicle, pickup, return_date, pickup).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.duration_days, days.max(1));
            assert_eq!(first.total_price, vehicle.daily_rate * Decimal::from(first.duration_days));
        }
    }

    #[test]
    fn test_rounds_half_up_to_cents() {
        assert_eq!(round_money(Decimal::from_str("10.005").unwrap()).to_string(), "10.01");
        assert_eq!(round_money(Decimal::from_str("10.004").unwrap()).to_string(), "10.00");
        assert_eq!(round_money(Decimal::from_str("7").unwrap()).to_string(), "7.00");
    }

    #[test]
    fn test_non_positive_rate_rejected() {
        let vehicle = vehicle_with_rate("0");
        let result = compute_quote(&vehicle, date(2024, 6, 1), date(2024, 6, 2), date(2024, 6, 1));
        assert!(matches!(result, Err(BookingError::Validation { field: "daily_rate", .. })));
    }
}
