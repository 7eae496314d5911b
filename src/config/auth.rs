//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shared-secret authentication for inbound requests.
///
/// Clients send the key in the `x-api-key` header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Expected `x-api-key` value. When absent, requests are not checked.
    pub api_key: Option<Secret<String>>,
}

impl AuthConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(Secret::new(api_key.into())),
        }
    }

    /// Check if an API key is configured
    pub fn is_enabled(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate authentication configuration
    ///
    /// Production requires a non-empty key.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if environment.requires_api_key() && !self.is_enabled() {
            return Err(ValidationError::MissingRequired("AUTH__API_KEY"));
        }
        Ok(())
    }
}
