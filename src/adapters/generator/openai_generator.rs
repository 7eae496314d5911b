//! OpenAI-compatible reply generator.
//!
//! Sends the conversation to a chat-completions endpoint with a persona
//! system prompt. The engagement phase appears only in the system prompt.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiGeneratorConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let generator = OpenAiReplyGenerator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::session::{Message, Phase, Sender};
use crate::ports::{CollaboratorError, EngagementContext, ReplyGenerator};

/// Configuration for the OpenAI reply generator.
#[derive(Debug, Clone)]
pub struct OpenAiGeneratorConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
}

impl OpenAiGeneratorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(20),
            max_tokens: 120,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions backed generator.
pub struct OpenAiReplyGenerator {
    config: OpenAiGeneratorConfig,
    client: Client,
}

impl OpenAiReplyGenerator {
    pub fn new(config: OpenAiGeneratorConfig) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CollaboratorError::unavailable(format!("HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request(
        &self,
        history: &[Message],
        text: &str,
        context: &EngagementContext,
    ) -> ChatRequest {
        let mut messages = vec![ChatMessage {
            role: "system".to_string(),
            content: system_prompt(context),
        }];
        // The persona is the assistant; the counterpart is the user.
        for msg in history {
            messages.push(ChatMessage {
                role: match msg.sender {
                    Sender::Scammer => "user",
                    Sender::User => "assistant",
                }
                .to_string(),
                content: msg.text.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: text.to_string(),
        });

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: 0.8,
        }
    }
}

fn system_prompt(context: &EngagementContext) -> String {
    let goal = match context.phase {
        Phase::Suspected => "Act worried and ask who is contacting you and why.",
        Phase::Engaging => {
            "Play along. Ask for the exact UPI ID, account number, phone number or link you should use."
        }
        Phase::Confirmed | Phase::Reported => {
            "Stall politely. Say the payment failed and ask for alternative payment details."
        }
    };
    let mut prompt = format!(
        "You are an ordinary, slightly confused bank customer chatting by text. \
         Never reveal suspicion, never mention fraud or scams, never share real credentials. \
         Reply in one or two short sentences. {}",
        goal
    );
    if let Some(language) = context.metadata.as_ref().and_then(|m| m.language.as_deref()) {
        prompt.push_str(&format!(" Reply in {}.", language));
    }
    prompt
}

#[async_trait]
impl ReplyGenerator for OpenAiReplyGenerator {
    async fn generate(
        &self,
        history: &[Message],
        text: &str,
        context: &EngagementContext,
    ) -> Result<String, CollaboratorError> {
        let request = self.build_request(history, text, context);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CollaboratorError::Timeout(self.config.timeout.as_millis() as u64)
                } else {
                    CollaboratorError::unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::unavailable(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::invalid_response(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|reply| !reply.is_empty())
            .ok_or_else(|| CollaboratorError::invalid_response("empty completion"))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
