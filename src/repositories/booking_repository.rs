use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::convert::TryFrom;
use uuid::Uuid;

use super::BookingRepository;
use crate::models::booking::{Booking, BookingStatus, NewBooking, PaymentStatus};
use crate::utils::errors::{AppError, AppResult};

const BOOKING_COLUMNS: &str = "id, vehicle_id, renter_id, driver_id, pickup_date, return_date, duration_days, \
     total_price, status, payment_status, pickup_location, dropoff_location, special_requests, created_at";

/// Fila tal como está en la tabla `bookings` (estados en TEXT)
#[derive(Debug, FromRow)]
struct BookingRow {
    id: Uuid,
    vehicle_id: Uuid,
    renter_id: Uuid,
    driver_id: Option<Uuid>,
    pickup_date: NaiveDate,
    return_date: NaiveDate,
    duration_days: i64,
    total_price: Decimal,
    status: String,
    payment_status: String,
    pickup_location: Option<String>,
    dropoff_location: Option<String>,
    special_requests: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = BookingStatus::from_str(&row.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown booking status '{}'", row.status)))?;
        let payment_status = PaymentStatus::from_str(&row.payment_status).ok_or_else(|| {
            AppError::Internal(format!("Unknown payment status '{}'", row.payment_status))
        })?;

        Ok(Booking {
            id: row.id,
            vehicle_id: row.vehicle_id,
            renter_id: row.renter_id,
            driver_id: row.driver_id,
            pickup_date: row.pickup_date,
            return_date: row.return_date,
            duration_days: row.duration_days,
            total_price: row.total_price,
            status,
            payment_status,
            pickup_location: row.pickup_location,
            dropoff_location: row.dropoff_location,
            special_requests: row.special_requests,
            created_at: row.created_at,
        })
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> AppResult<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            r#"
            INSERT INTO bookings ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            BOOKING_COLUMNS, BOOKING_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(booking.vehicle_id)
        .bind(booking.renter_id)
        .bind(booking.driver_id)
        .bind(booking.date_range.pickup_date)
        .bind(booking.date_range.return_date)
        .bind(booking.duration_days)
        .bind(booking.total_price)
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .bind(&booking.pickup_location)
        .bind(&booking.dropoff_location)
        .bind(&booking.special_requests)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Booking::try_from(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn list_by_renter(&self, renter_id: Uuid) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings WHERE renter_id = $1 ORDER BY created_at DESC",
            BOOKING_COLUMNS
        ))
        .bind(renter_id)
        .fetch_all(&self.pool)
        .await?;

        into_bookings(rows)
    }

    async fn list_all(&self) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {} FROM bookings ORDER BY created_at DESC",
            BOOKING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        into_bookings(rows)
    }

    async fn update_status(&self, booking: &Booking) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "UPDATE bookings SET status = $2, payment_status = $3 WHERE id = $1 RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(booking.id)
        .bind(booking.status.as_str())
        .bind(booking.payment_status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }
}
