//! Final report callback configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::application::handlers::report::RetryPolicy;

/// Where and how final reports are delivered.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackConfig {
    /// Evaluator endpoint receiving the final report
    #[serde(default = "default_url")]
    pub url: String,

    /// Deadline for one delivery attempt, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,

    /// Deliveries allowed in flight across all sessions
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_deliveries: usize,
}

impl CallbackConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            attempt_timeout: self.timeout(),
        }
    }

    /// Validate callback configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let parsed = url::Url::parse(&self.url)
            .map_err(|_| ValidationError::InvalidCallbackUrl(self.url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidCallbackUrl(self.url.clone()));
        }
        if environment.requires_https_callback() && parsed.scheme() != "https" {
            return Err(ValidationError::CallbackMustBeHttps);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidRetry("timeout_secs must be positive"));
        }
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidRetry("max_attempts must be positive"));
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(ValidationError::InvalidRetry(
                "initial_backoff_ms exceeds max_backoff_ms",
            ));
        }
        if self.max_concurrent_deliveries == 0 {
            return Err(ValidationError::InvalidRetry(
                "max_concurrent_deliveries must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for CallbackConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            max_concurrent_deliveries: default_max_concurrent(),
        }
    }
}

fn default_url() -> String {
    "https://hackathon.guvi.in/api/updateHoneyPotFinalResult".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    4
}

fn default_initial_backoff() -> u64 {
    500
}

fn default_max_backoff() -> u64 {
    8_000
}

fn default_max_concurrent() -> usize {
    8
}
