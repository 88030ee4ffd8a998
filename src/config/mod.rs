//! Application configuration.
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `TERMTABLE` prefix
//! and nested values use `__` as the separator:
//!
//! - `TERMTABLE__SERVER__PORT=8080` -> `server.port = 8080`
//! - `TERMTABLE__REALTIME__CHANNEL_CAPACITY=64` -> `realtime.channel_capacity = 64`

mod error;
mod realtime;
mod server;

pub use error::{ConfigError, ValidationError};
pub use realtime::RealtimeConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment).
    #[serde(default)]
    pub server: ServerConfig,

    /// Real-time push configuration.
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

impl AppConfig {
    /// Loads configuration from the environment, reading `.env` first if
    /// one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable cannot be parsed into its
    /// expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TERMTABLE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of all sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.realtime.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
