//! Intelligence Extractor Adapters
//!
//! - **PatternIntelligenceExtractor** - Regex extraction of payment details and links (default)
//! - **MockIntelligenceExtractor** - Scripted facts for tests

mod mock_extractor;
mod pattern_extractor;

pub use mock_extractor::MockIntelligenceExtractor;
pub use pattern_extractor::PatternIntelligenceExtractor;
