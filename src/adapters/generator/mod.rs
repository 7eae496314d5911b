//! Reply Generator Adapters
//!
//! - **PersonaReplyGenerator** - Phase-aware templates (default)
//! - **OpenAiReplyGenerator** - OpenAI-compatible chat completions
//! - **MockReplyGenerator** - Scripted replies for tests

mod mock_generator;
mod openai_generator;
mod persona_generator;

pub use mock_generator::MockReplyGenerator;
pub use openai_generator::{OpenAiGeneratorConfig, OpenAiReplyGenerator};
pub use persona_generator::{PersonaReplyGenerator, FALLBACK_REPLY};
