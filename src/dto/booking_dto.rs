use serde::Deserialize;

use crate::models::booking::{BookingStatus, BookingTab, PaymentStatus};

// Query de "mis reservas"
#[derive(Debug, Default, Deserialize)]
pub struct BookingsQuery {
    pub tab: Option<BookingTab>,
}

// Query del listado de administración; `status` admite "all"
#[derive(Debug, Default, Deserialize)]
pub struct AdminBookingsQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: PaymentStatus,
}
