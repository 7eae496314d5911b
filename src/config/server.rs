//! Listener, deployment mode and request deadline for the HTTP surface.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Longest request deadline accepted; the evaluator expects a prompt reply.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Deployment mode. Production tightens what the other sections accept.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(alias = "dev", alias = "local")]
    Development,
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    /// Inbound turns must carry a configured `x-api-key`.
    pub fn requires_api_key(self) -> bool {
        self == Environment::Production
    }

    /// Reports carry extracted account data and may only leave over TLS.
    pub fn requires_https_callback(self) -> bool {
        self == Environment::Production
    }

    /// Logs go out as JSON lines for the collector.
    pub fn json_logs(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive; `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whole-request deadline applied by the router. Must leave room for a
    /// turn's two collaborator rounds, see [`ServerConfig::fits_turn`].
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated; unset or empty allows any origin
    pub cors_origins: Option<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ValidationError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|_| ValidationError::InvalidBindAddress(raw))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    /// A turn waits on the classifier and extractor together, then on the
    /// generator. If the router cut the request first the counterpart would
    /// see a timeout instead of the fallback reply.
    pub fn fits_turn(&self, collaborator_timeout: Duration) -> Result<(), ValidationError> {
        let needed = collaborator_timeout * 2;
        if self.request_timeout() <= needed {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_ms: self.request_timeout().as_millis() as u64,
                needed_ms: needed.as_millis() as u64,
            });
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        self.bind_addr().map(|_| ())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info,honeypot=debug,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
