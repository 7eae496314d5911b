//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage
//!
//! - `SessionStore` - Keyed session records with version-checked updates
//!
//! ## Collaborators
//!
//! - `ScamClassifier` - Scores a message for malicious intent
//! - `IntelligenceExtractor` - Pulls raw facts out of a message
//! - `ReplyGenerator` - Produces the persona's next message
//!
//! ## Delivery
//!
//! - `ReportSink` - Sends the final report to the external evaluator
//!
//! ## Audit
//!
//! - `DecisionLog` - Per-turn detection decisions and their statistics

mod collaborator;
mod decision_log;
mod intelligence_extractor;
mod reply_generator;
mod report_sink;
mod scam_classifier;
mod session_store;

pub use collaborator::CollaboratorError;
pub use decision_log::DecisionLog;
pub use intelligence_extractor::IntelligenceExtractor;
pub use reply_generator::{EngagementContext, ReplyGenerator};
pub use report_sink::{DeliveryError, ReportSink};
pub use scam_classifier::ScamClassifier;
pub use session_store::{SessionMutator, SessionStore};
