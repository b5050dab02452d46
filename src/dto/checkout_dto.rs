use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::payment::{CardDetails, PaymentMethodToken};
use crate::services::booking_flow::{BookingFlow, CheckoutStep, TripDetails};
use crate::services::quote::BookingQuote;

// Request para iniciar un checkout
#[derive(Debug, Deserialize)]
pub struct StartCheckoutRequest {
    pub vehicle_id: Uuid,
}

// Request de fechas y detalles del viaje (fechas "YYYY-MM-DD")
#[derive(Debug, Default, Deserialize)]
pub struct SetDatesRequest {
    pub pickup_date: Option<String>,
    pub return_date: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub special_requests: Option<String>,
}

// Método de pago: token guardado o tarjeta nueva
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PaymentMethodRequest {
    Saved { payment_method_token: PaymentMethodToken },
    NewCard(CardDetails),
}

#[derive(Debug, Serialize)]
pub struct CheckoutVehicle {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub image_url: String,
    pub available: bool,
}

// Snapshot del checkout para el cliente
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub step: CheckoutStep,
    pub vehicle: CheckoutVehicle,
    pub pickup_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub trip: TripDetails,
    pub quote: Option<BookingQuote>,
    pub payment_method: Option<PaymentMethodToken>,
}

impl CheckoutResponse {
    /// `quote` es la cotización congelada o, en `Summary`, la vista previa
    pub fn from_flow(id: Uuid, flow: &BookingFlow, quote: Option<BookingQuote>) -> Self {
        let vehicle = flow.vehicle();
        Self {
            id,
            step: flow.step(),
            vehicle: CheckoutVehicle {
                id: vehicle.id,
                name: vehicle.name.clone(),
                display_name: vehicle.display_name(),
                image_url: vehicle.image_url.clone(),
                available: vehicle.available,
            },
            pickup_date: flow.pickup_date(),
            return_date: flow.return_date(),
            trip: flow.trip().clone(),
            quote: quote.or_else(|| flow.quote().cloned()),
            payment_method: flow.payment_method().cloned(),
        }
    }
}
