//! Identidad del solicitante
//!
//! `RenterIdentity` se extrae por request del JWT y se pasa explícitamente
//! al flujo de reserva.

use serde::Serialize;
use uuid::Uuid;

use crate::utils::errors::BookingError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenterIdentity {
    Authenticated {
        renter_id: Uuid,
        email: String,
        is_admin: bool,
    },
    Anonymous,
}

impl RenterIdentity {
    pub fn authenticated(renter_id: Uuid, email: impl Into<String>, is_admin: bool) -> Self {
        RenterIdentity::Authenticated {
            renter_id,
            email: email.into(),
            is_admin,
        }
    }

    /// Id del renter actual o `Unauthenticated`
    pub fn current_renter_id(&self) -> Result<Uuid, BookingError> {
        match self {
            RenterIdentity::Authenticated { renter_id, .. } => Ok(*renter_id),
            RenterIdentity::Anonymous => Err(BookingError::Unauthenticated),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, RenterIdentity::Authenticated { is_admin: true, .. })
    }
}
