use chrono::NaiveDate;
use tokio::sync::OwnedMutexGuard;
use tracing::info;
use uuid::Uuid;

use crate::controllers::vehicle_controller::parse_date;
use crate::dto::checkout_dto::{CheckoutResponse, PaymentMethodRequest, SetDatesRequest};
use crate::models::auth::RenterIdentity;
use crate::models::booking::Booking;
use crate::services::booking_flow::{BookingFlow, CheckoutStep, TripDetails};
use crate::state::{AppState, CheckoutSession};
use crate::utils::errors::{AppResult, BookingError};

pub struct CheckoutController<'a> {
    state: &'a AppState,
}

fn not_found(id: Uuid) -> BookingError {
    BookingError::NotFound(format!("Checkout {} not found", id))
}

fn optional_date(field: &'static str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(field, raw).map(Some),
    }
}

impl<'a> CheckoutController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Sesión bloqueada y accesible para `identity`; si no, se comporta como inexistente.
    /// El acceso se comprueba con el mismo guard que usa el llamador para modificarla.
    async fn session(&self, id: Uuid, identity: &RenterIdentity) -> AppResult<OwnedMutexGuard<CheckoutSession>> {
        let session = self.state.checkouts.get(id).await.ok_or_else(|| not_found(id))?;
        let guard = session.lock_owned().await;
        if !guard.can_access(identity) {
            return Err(not_found(id).into());
        }
        Ok(guard)
    }

    fn respond(&self, id: Uuid, session: &CheckoutSession) -> CheckoutResponse {
        let preview = match session.flow.step() {
            CheckoutStep::Summary => session.flow.preview_quote(self.state.today()).ok().flatten(),
            _ => None,
        };
        CheckoutResponse::from_flow(id, &session.flow, preview)
    }

    pub async fn start(&self, vehicle_id: Uuid, identity: &RenterIdentity) -> AppResult<CheckoutResponse> {
        let flow = BookingFlow::start(vehicle_id, self.state.vehicles.as_ref()).await?;
        let session = CheckoutSession::new(flow, identity.current_renter_id().ok());
        let response_flow = session.flow.clone();
        let id = self.state.checkouts.insert(session).await;
        info!("🛒 Checkout {} iniciado para vehículo {}", id, vehicle_id);
        Ok(CheckoutResponse::from_flow(id, &response_flow, None))
    }

    pub async fn get(&self, id: Uuid, identity: &RenterIdentity) -> AppResult<CheckoutResponse> {
        let session = self.session(id, identity).await?;
        Ok(self.respond(id, &session))
    }

    /// Fija fechas y detalles; devuelve la cotización recalculada
    pub async fn set_dates(
        &self,
        id: Uuid,
        identity: &RenterIdentity,
        request: SetDatesRequest,
    ) -> AppResult<CheckoutResponse> {
        let pickup_date = optional_date("pickup_date", request.pickup_date.as_deref())?;
        let return_date = optional_date("return_date", request.return_date.as_deref())?;

        let mut session = self.session(id, identity).await?;
        session.flow.set_dates(pickup_date, return_date)?;
        session.flow.set_trip_details(TripDetails {
            pickup_location: request.pickup_location,
            dropoff_location: request.dropoff_location,
            special_requests: request.special_requests,
        })?;
        session.touch();

        let preview = session.flow.preview_quote(self.state.today())?;
        Ok(CheckoutResponse::from_flow(id, &session.flow, preview))
    }

    /// `Summary → Payment`
    pub async fn proceed_to_payment(&self, id: Uuid, identity: &RenterIdentity) -> AppResult<CheckoutResponse> {
        let mut session = self.session(id, identity).await?;

        if session.flow.step() == CheckoutStep::Summary {
            let vehicle_id = session.flow.vehicle().id;
            let latest = self
                .state
                .vehicles
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| BookingError::NotFound(format!("Vehicle {} not found", vehicle_id)))?;
            session.flow.refresh_vehicle(latest)?;
        }

        session.flow.proceed_to_payment(identity, self.state.today())?;
        session.claim(identity);
        session.touch();
        Ok(self.respond(id, &session))
    }

    /// Selecciona un método guardado o tokeniza una tarjeta nueva
    pub async fn payment_method(
        &self,
        id: Uuid,
        identity: &RenterIdentity,
        request: PaymentMethodRequest,
    ) -> AppResult<CheckoutResponse> {
        let renter_id = identity.current_renter_id()?;
        let mut session = self.session(id, identity).await?;

        if session.flow.step() != CheckoutStep::Payment {
            return Err(BookingError::InvalidTransition(format!(
                "payment method cannot be set in step {}",
                session.flow.step().name()
            ))
            .into());
        }

        let token = match request {
            PaymentMethodRequest::Saved { payment_method_token } => self
                .state
                .payments
                .find_payment_method(renter_id, &payment_method_token)
                .await?
                .ok_or_else(|| BookingError::validation("payment_method", "Unknown payment method"))?
                .token,
            PaymentMethodRequest::NewCard(card) => {
                self.state
                    .payments
                    .add_payment_method(renter_id, card, self.state.today())
                    .await?
                    .token
            }
        };

        session.flow.select_payment_method(token)?;
        session.touch();
        Ok(self.respond(id, &session))
    }

    /// `Payment → Summary`
    pub async fn back_to_summary(&self, id: Uuid, identity: &RenterIdentity) -> AppResult<CheckoutResponse> {
        let mut session = self.session(id, identity).await?;
        session.flow.back_to_summary()?;
        session.touch();
        Ok(self.respond(id, &session))
    }

    /// `Payment → Confirmed`; el lock de la sesión se mantiene durante la persistencia
    pub async fn confirm(&self, id: Uuid, identity: &RenterIdentity) -> AppResult<Booking> {
        identity.current_renter_id()?;
        let mut session = self.session(id, identity).await?;
        let booking = session.flow.confirm(self.state.bookings.as_ref()).await?;
        session.touch();
        Ok(booking)
    }

    pub async fn abandon(&self, id: Uuid, identity: &RenterIdentity) -> AppResult<()> {
        let _session = self.session(id, identity).await?;
        if !self.state.checkouts.remove(id).await {
            return Err(not_found(id).into());
        }
        Ok(())
    }
}
