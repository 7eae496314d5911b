//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Sharded in-memory session store
//! - `classifier` - Pattern-based scam classifier and mock
//! - `extractor` - Pattern-based intelligence extractor and mock
//! - `generator` - Persona, OpenAI-compatible and mock reply generators
//! - `callback` - HTTP report sink and recording sink
//! - `decisions` - Bounded in-memory decision log
//! - `http` - axum routes, DTOs and middleware
//! - `maintenance` - Background redelivery and idle expiry

pub mod callback;
pub mod classifier;
pub mod decisions;
pub mod extractor;
pub mod generator;
pub mod http;
pub mod maintenance;
pub mod storage;

pub use callback::{HttpReportSink, RecordingReportSink};
pub use classifier::{MockScamClassifier, PatternScamClassifier};
pub use decisions::InMemoryDecisionLog;
pub use extractor::{MockIntelligenceExtractor, PatternIntelligenceExtractor};
pub use generator::{MockReplyGenerator, OpenAiReplyGenerator, PersonaReplyGenerator};
pub use maintenance::{MaintenanceConfig, MaintenanceWorker};
pub use storage::InMemorySessionStore;
