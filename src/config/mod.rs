//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `THERAPY_BOOKING`
//! prefix and nested values are separated by double underscores.
//!
//! ```no_run
//! use therapy_booking::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod booking;
mod database;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use booking::BookingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "THERAPY_BOOKING";

/// Root application configuration
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; leave the URL unset to run on in-memory stores
    #[serde(default)]
    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    #[serde(default)]
    pub payment: PaymentConfig,

    #[serde(default)]
    pub booking: BookingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `THERAPY_BOOKING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `THERAPY_BOOKING__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        self.booking.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "THERAPY_BOOKING__AUTH__JWT_SECRET",
        "THERAPY_BOOKING__SERVER__PORT",
        "THERAPY_BOOKING__DATABASE__URL",
        "THERAPY_BOOKING__PAYMENT__CURRENCY",
        "THERAPY_BOOKING__BOOKING__LATE_CANCELLATION_HOURS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_minimal_environment_loads_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("THERAPY_BOOKING__AUTH__JWT_SECRET", "dev-secret");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.server.port, 8080);
        assert!(!config.database.is_configured());
        assert_eq!(config.payment.currency, "INR");
        assert_eq!(config.booking.late_cancellation_hours, 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("THERAPY_BOOKING__AUTH__JWT_SECRET", "dev-secret");
        env::set_var("THERAPY_BOOKING__SERVER__PORT", "3000");
        env::set_var("THERAPY_BOOKING__DATABASE__URL", "postgresql://localhost/booking");
        env::set_var("THERAPY_BOOKING__BOOKING__LATE_CANCELLATION_HOURS", "12");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.server.port, 3000);
        assert!(config.database.is_configured());
        assert_eq!(config.booking.late_cancellation_hours, 12);
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
