//! Intelligence Extractor Port - Pulls raw facts out of a message.

use async_trait::async_trait;

use super::CollaboratorError;
use crate::domain::intelligence::ExtractedFacts;

/// Port for fact extraction.
///
/// Returned values are raw; normalization happens when they are merged.
#[async_trait]
pub trait IntelligenceExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<ExtractedFacts, CollaboratorError>;
}
