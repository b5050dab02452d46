//! Services module
//!
//! Este módulo contiene la lógica de negocio: cotizaciones, el flujo de
//! checkout, pagos, autenticación, filtros y estadísticas.

pub mod auth_service;
pub mod booking_flow;
pub mod dashboard;
pub mod filtering;
pub mod payment_service;
pub mod quote;

pub use booking_flow::{BookingFlow, CheckoutStep, TripDetails};
pub use payment_service::{InProcessPaymentGateway, PaymentGateway};
pub use quote::{compute_quote, BookingQuote};
