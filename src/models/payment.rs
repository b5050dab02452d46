//! Métodos de pago
//!
//! Datos de tarjeta recibidos del cliente y el método tokenizado que queda
//! guardado. El número completo y el CVV nunca se almacenan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Marca de tarjeta detectada por prefijo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

/// Datos de tarjeta tal como llegan del formulario
#[derive(Clone, Deserialize)]
pub struct CardDetails {
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_holder", &self.card_holder)
            .field("expiry_date", &self.expiry_date)
            .finish_non_exhaustive()
    }
}

/// Token opaco emitido por la pasarela
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentMethodToken(pub String);

impl PaymentMethodToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentMethodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Método de pago guardado de un renter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMethod {
    pub token: PaymentMethodToken,
    pub renter_id: Uuid,
    pub brand: CardBrand,
    pub last4: String,
    /// Número enmascarado, p.ej. "•••• •••• •••• 1234"
    pub display_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub created_at: DateTime<Utc>,
}
