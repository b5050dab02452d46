//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: configuración, repositorios, pasarela de
//! pago y las sesiones de checkout en curso.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::models::auth::RenterIdentity;
use crate::repositories::{
    BookingRepository, DriverRepository, InMemoryStore, PgBookingRepository, PgDriverRepository,
    PgUserRepository, PgVehicleRepository, UserRepository, VehicleRepository,
};
use crate::services::booking_flow::BookingFlow;
use crate::services::payment_service::{InProcessPaymentGateway, PaymentGateway};
use crate::utils::jwt::JwtConfig;

/// Checkout en curso de un renter
#[derive(Debug)]
pub struct CheckoutSession {
    pub flow: BookingFlow,
    /// Dueño del checkout; se fija con el primer renter autenticado que lo usa
    pub owner: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(flow: BookingFlow, owner: Option<Uuid>) -> Self {
        Self {
            flow,
            owner,
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn is_stale(&self, ttl: Duration) -> bool {
        Utc::now() - self.updated_at > ttl
    }

    /// Un checkout sin dueño es accesible con su id; con dueño, sólo para él
    pub fn can_access(&self, identity: &RenterIdentity) -> bool {
        match (self.owner, identity.current_renter_id()) {
            (None, _) => true,
            (Some(owner), Ok(renter_id)) => owner == renter_id,
            (Some(_), Err(_)) => false,
        }
    }

    /// Reclama el checkout para el renter autenticado
    pub fn claim(&mut self, identity: &RenterIdentity) {
        if self.owner.is_none() {
            self.owner = identity.current_renter_id().ok();
        }
    }
}

/// Sesiones de checkout indexadas por id, cada una con su propio mutex
#[derive(Clone, Default)]
pub struct CheckoutSessions {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<CheckoutSession>>>>>,
}

impl CheckoutSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: CheckoutSession) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, Arc::new(Mutex::new(session)));
        log::debug!("🛒 Checkout {} creado", id);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<CheckoutSession>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            log::info!("🗑️ Checkout {} abandonado", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Elimina sesiones inactivas más allá de `ttl`; las que están en uso se respetan
    pub async fn cleanup_stale(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => !session.is_stale(ttl),
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            log::info!("🧹 {} checkouts caducados eliminados, {} activos", removed, sessions.len());
        }
        removed
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub drivers: Arc<dyn DriverRepository>,
    pub users: Arc<dyn UserRepository>,
    pub payments: Arc<dyn PaymentGateway>,
    pub checkouts: CheckoutSessions,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        vehicles: Arc<dyn VehicleRepository>,
        bookings: Arc<dyn BookingRepository>,
        drivers: Arc<dyn DriverRepository>,
        users: Arc<dyn UserRepository>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            jwt: JwtConfig::from(&config),
            config: Arc::new(config),
            vehicles,
            bookings,
            drivers,
            users,
            payments,
            checkouts: CheckoutSessions::new(),
        }
    }

    /// Estado sobre el almacén en memoria
    pub fn in_memory(config: EnvironmentConfig, store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self::new(
            config,
            store.clone(),
            store.clone(),
            store.clone(),
            store,
            Arc::new(InProcessPaymentGateway::new()),
        )
    }

    /// Estado sobre PostgreSQL
    pub fn postgres(config: EnvironmentConfig, pool: PgPool) -> Self {
        Self::new(
            config,
            Arc::new(PgVehicleRepository::new(pool.clone())),
            Arc::new(PgBookingRepository::new(pool.clone())),
            Arc::new(PgDriverRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            Arc::new(InProcessPaymentGateway::new()),
        )
    }

    /// Fecha de evaluación de cotizaciones (UTC)
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    pub fn checkout_ttl(&self) -> Duration {
        Duration::minutes(self.config.checkout_ttl_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::fixtures::sample_vehicle;

    #[test]
    fn test_session_access_rules() {
        let owner = Uuid::new_v4();
        let session = CheckoutSession::new(BookingFlow::new(sample_vehicle()), Some(owner));
        assert!(session.can_access(&RenterIdentity::authenticated(owner, "a@example.com", false)));
        assert!(!session.can_access(&RenterIdentity::authenticated(Uuid::new_v4(), "b@example.com", false)));
        assert!(!session.can_access(&RenterIdentity::Anonymous));

        let mut open = CheckoutSession::new(BookingFlow::new(sample_vehicle()), None);
        assert!(open.can_access(&RenterIdentity::Anonymous));
        open.claim(&RenterIdentity::authenticated(owner, "a@example.com", false));
        assert_eq!(open.owner, Some(owner));
    }

    #[tokio::test]
    async fn test_cleanup_removes_stale_sessions() {
        let sessions = CheckoutSessions::new();
        let mut stale = CheckoutSession::new(BookingFlow::new(sample_vehicle()), None);
        stale.updated_at = Utc::now() - Duration::minutes(90);
        sessions.insert(stale).await;
        let fresh_id = sessions
            .insert(CheckoutSession::new(BookingFlow::new(sample_vehicle()), None))
            .await;

        assert_eq!(sessions.cleanup_stale(Duration::minutes(30)).await, 1);
        assert_eq!(sessions.len().await, 1);
        assert!(sessions.get(fresh_id).await.is_some());
    }

    #[tokio::test]
    async fn test_remove_session() {
        let sessions = CheckoutSessions::new();
        let id = sessions
            .insert(CheckoutSession::new(BookingFlow::new(sample_vehicle()), None))
            .await;
        assert!(sessions.remove(id).await);
        assert!(!sessions.remove(id).await);
    }
}
