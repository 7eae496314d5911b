//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HONEYPOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use honeypot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.bind_addr().unwrap());
//! ```

mod ai;
mod auth;
mod callback;
mod engagement;
mod error;
mod server;
mod storage;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use callback::CallbackConfig;
pub use engagement::EngagementConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Inbound `x-api-key` check
    #[serde(default)]
    pub auth: AuthConfig,

    /// Final report delivery
    #[serde(default)]
    pub callback: CallbackConfig,

    /// Phase thresholds and collaborator deadlines
    #[serde(default)]
    pub engagement: EngagementConfig,

    /// Session store tuning and idle expiry
    #[serde(default)]
    pub storage: StorageConfig,

    /// Optional LLM reply generator
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HONEYPOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HONEYPOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HONEYPOT__CALLBACK__URL=...` -> `callback.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HONEYPOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.server.fits_turn(self.engagement.collaborator_timeout())?;
        self.auth.validate(&self.server.environment)?;
        self.callback.validate(&self.server.environment)?;
        self.engagement.validate()?;
        self.storage.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }
}
