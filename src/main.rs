use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn, Level};
use dotenvy::dotenv;

use vehicle_rental::config::database::DatabaseConfig;
use vehicle_rental::config::environment::EnvironmentConfig;
use vehicle_rental::database::DatabaseConnection;
use vehicle_rental::repositories::{fixtures, InMemoryStore};
use vehicle_rental::routes::create_router;
use vehicle_rental::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(log_level(&config))
        .init();

    info!("🚙 Vehicle Rental API");
    info!("================================================");

    let state = match config.database_url.clone() {
        Some(url) => {
            let db_connection = match DatabaseConnection::connect(&DatabaseConfig::new(url)).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            info!("✅ PostgreSQL conectado");
            AppState::postgres(config, db_connection.pool().clone())
        }
        None => {
            warn!("⚠️ DATABASE_URL no definida, usando almacenamiento en memoria");
            AppState::in_memory(config, InMemoryStore::new())
        }
    };

    if state.config.seed_fixtures {
        if state.vehicles.list().await?.is_empty() {
            fixtures::seed(state.vehicles.as_ref(), state.drivers.as_ref()).await?;
        } else {
            info!("🌱 Catálogo ya poblado, fixtures omitidos");
        }
    }

    // Limpieza periódica de checkouts abandonados
    let checkouts = state.checkouts.clone();
    let ttl = state.checkout_ttl();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            checkouts.cleanup_stale(ttl).await;
        }
    });

    let addr: SocketAddr = state.config.server_url().parse()?;
    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registrar renter");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Perfil actual");
    info!("   PUT  /api/auth/me - Actualizar perfil");
    info!("🚗 Vehículos:");
    info!("   GET  /api/vehicles - Listar y filtrar vehículos");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   GET  /api/vehicles/:id/quote - Cotizar fechas");
    info!("🛒 Checkout:");
    info!("   POST /api/checkout - Iniciar checkout");
    info!("   GET  /api/checkout/:id - Estado del checkout");
    info!("   PUT  /api/checkout/:id/dates - Fechas y detalles del viaje");
    info!("   POST /api/checkout/:id/payment - Pasar a pago");
    info!("   POST /api/checkout/:id/payment-method - Elegir método de pago");
    info!("   POST /api/checkout/:id/back - Volver al resumen");
    info!("   POST /api/checkout/:id/confirm - Confirmar reserva");
    info!("   DELETE /api/checkout/:id - Abandonar checkout");
    info!("📋 Reservas:");
    info!("   GET  /api/bookings - Mis reservas (?tab=upcoming|completed|cancelled)");
    info!("   GET  /api/bookings/:id - Detalle de reserva");
    info!("   POST /api/bookings/:id/cancel - Cancelar reserva");
    info!("💳 Métodos de pago:");
    info!("   GET  /api/payment-methods - Listar tarjetas guardadas");
    info!("   POST /api/payment-methods - Añadir tarjeta");
    info!("🛡️ Administración:");
    info!("   POST/PUT/DELETE /api/admin/vehicles - Gestión de flota");
    info!("   GET/POST/PUT/DELETE /api/admin/drivers - Gestión de conductores");
    info!("   GET  /api/admin/bookings - Reservas (?status, ?search)");
    info!("   PATCH /api/admin/bookings/:id/status - Cambiar estado");
    info!("   PATCH /api/admin/bookings/:id/payment-status - Cambiar estado de pago");
    info!("   GET  /api/admin/dashboard - Estadísticas");
    info!("   POST /api/admin/users/:id/promote - Promover a administrador");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Nivel de log: `LOG_LEVEL` o DEBUG en desarrollo, INFO en otro caso
fn log_level(config: &EnvironmentConfig) -> Level {
    let default = if config.is_development() { Level::DEBUG } else { Level::INFO };
    config
        .log_level
        .as_deref()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(default)
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
