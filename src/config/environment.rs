//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

const DEV_JWT_SECRET: &str = "dev-only-jwt-secret-change-me";

/// Máximo de inactividad de un checkout: una semana
const MAX_CHECKOUT_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub database_url: Option<String>,
    pub seed_fixtures: bool,
    pub checkout_ttl_minutes: i64,
    pub admin_invite_code: Option<String>,
    pub log_level: Option<String>,
    pub max_concurrent_requests: usize,
    pub bcrypt_cost: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 86_400,
            cors_origins: Vec::new(),
            database_url: None,
            seed_fixtures: false,
            checkout_ttl_minutes: 30,
            admin_invite_code: None,
            log_level: None,
            max_concurrent_requests: 512,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => {
                return Err(anyhow!("JWT_SECRET must be set in production"));
            }
            _ => defaults.jwt_secret,
        };

        let config = Self {
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            seed_fixtures: parse_var("SEED_FIXTURES", defaults.seed_fixtures)?,
            checkout_ttl_minutes: parse_var("CHECKOUT_TTL_MINUTES", defaults.checkout_ttl_minutes)?,
            admin_invite_code: env::var("ADMIN_INVITE_CODE").ok().filter(|c| !c.is_empty()),
            log_level: env::var("LOG_LEVEL").ok(),
            max_concurrent_requests: parse_var("MAX_CONCURRENT_REQUESTS", defaults.max_concurrent_requests)?,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
            environment,
        };
        config.check_limits()?;
        Ok(config)
    }

    /// Rechazar valores que dejarían el servidor colgado o harían fallar los cálculos de tiempo
    pub fn check_limits(&self) -> Result<()> {
        if !(1..=MAX_CHECKOUT_TTL_MINUTES).contains(&self.checkout_ttl_minutes) {
            return Err(anyhow!(
                "CHECKOUT_TTL_MINUTES must be between 1 and {}, got {}",
                MAX_CHECKOUT_TTL_MINUTES,
                self.checkout_ttl_minutes
            ));
        }
        if self.max_concurrent_requests == 0 {
            return Err(anyhow!("MAX_CONCURRENT_REQUESTS must be at least 1"));
        }
        Ok(())
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} must be a valid value, got '{}'", name, raw)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_check_limits() {
        assert!(EnvironmentConfig::default().check_limits().is_ok());

        let huge_ttl = EnvironmentConfig {
            checkout_ttl_minutes: i64::MAX,
            ..EnvironmentConfig::default()
        };
        assert!(huge_ttl.check_limits().is_err());

        let no_ttl = EnvironmentConfig {
            checkout_ttl_minutes: 0,
            ..EnvironmentConfig::default()
        };
        assert!(no_ttl.check_limits().is_err());

        let no_slots = EnvironmentConfig {
            max_concurrent_requests: 0,
            ..EnvironmentConfig::default()
        };
        let error = no_slots.check_limits().unwrap_err();
        assert!(error.to_string().contains("MAX_CONCURRENT_REQUESTS"));
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let value: u16 = parse_var("VEHICLE_RENTAL_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(value, 8080);
    }
}
