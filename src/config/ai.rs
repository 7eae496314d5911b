//! AI reply generator configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::generator::OpenAiGeneratorConfig;

/// OpenAI-compatible generator settings.
///
/// Without an API key the template persona generator is used.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Generator settings, when a key is configured.
    pub fn generator_config(&self) -> Option<OpenAiGeneratorConfig> {
        let key = self.openai_api_key.as_ref().filter(|_| self.has_openai())?;
        Some(
            OpenAiGeneratorConfig::new(key.expose_secret().clone())
                .with_model(self.model.clone())
                .with_base_url(self.base_url.clone())
                .with_timeout(self.timeout()),
        )
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Ok(());
        }
        url::Url::parse(&self.base_url)
            .map_err(|_| ValidationError::InvalidAiBaseUrl(self.base_url.clone()))?;
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    20
}
