//! Templated persona replies.
//!
//! Plays a slightly confused, cooperative account holder. Early replies ask
//! what is going on; once engaged the persona plays along and asks for the
//! exact payment details; after confirmation it stalls while keeping the
//! counterpart talking.

use async_trait::async_trait;

use crate::domain::session::{Message, Phase};
use crate::ports::{CollaboratorError, EngagementContext, ReplyGenerator};

/// Reply used whenever generation fails or is skipped.
pub const FALLBACK_REPLY: &str = "Sorry, I didn't quite get that. Can you explain again?";

const SUSPECTED: &[&str] = &[
    "Oh no, what happened to my account? Who is this?",
    "I don't understand. Which bank are you calling from?",
    "Is this really from the bank? What do I need to do?",
];

const ENGAGING: &[&str] = &[
    "Okay, I want to fix this. Where exactly should I send the money?",
    "Can you share the UPI ID again? I want to make sure I type it correctly.",
    "My app is asking for the account number and IFSC. Can you send those?",
    "Is there a link I should open? Please send it here.",
    "What number can I call you back on if this gets disconnected?",
];

const CONFIRMED: &[&str] = &[
    "I'm trying, but the payment keeps failing. Is there another account I can use?",
    "My son is helping me with the phone, give me a few minutes.",
    "The app says the UPI ID is not verified. Can you send a different one?",
    "Please stay on, I'm going to the bank branch to ask them.",
];

/// Deterministic, phase-aware template generator.
#[derive(Debug, Clone, Default)]
pub struct PersonaReplyGenerator;

impl PersonaReplyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Picks the template for a phase and turn.
    pub fn reply_for(&self, context: &EngagementContext) -> &'static str {
        let templates = match context.phase {
            Phase::Suspected => SUSPECTED,
            Phase::Engaging => ENGAGING,
            Phase::Confirmed | Phase::Reported => CONFIRMED,
        };
        templates[context.turn_count % templates.len()]
    }
}

#[async_trait]
impl ReplyGenerator for PersonaReplyGenerator {
    async fn generate(
        &self,
        _history: &[Message],
        _text: &str,
        context: &EngagementContext,
    ) -> Result<String, CollaboratorError> {
        Ok(self.reply_for(context).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_never_empty() {
        let generator = PersonaReplyGenerator::new();
        for phase in [Phase::Suspected, Phase::Engaging, Phase::Confirmed, Phase::Reported] {
            for turn in 0..6 {
                let reply = generator
                    .generate(&[], "hi", &EngagementContext::new(phase, turn))
                    .await
                    .unwrap();
                assert!(!reply.trim().is_empty());
            }
        }
    }

    #[test]
    fn engaging_persona_asks_for_details() {
        let generator = PersonaReplyGenerator::new();
        let reply = generator.reply_for(&EngagementContext::new(Phase::Engaging, 1));
        assert!(reply.contains("UPI ID"));
    }

    #[test]
    fn replies_never_reveal_the_phase() {
        let generator = PersonaReplyGenerator::new();
        for phase in [Phase::Suspected, Phase::Engaging, Phase::Confirmed] {
            for turn in 0..6 {
                let reply = generator.reply_for(&EngagementContext::new(phase, turn)).to_lowercase();
                assert!(!reply.contains("confirmed"));
                assert!(!reply.contains("scam"));
            }
        }
    }
}
