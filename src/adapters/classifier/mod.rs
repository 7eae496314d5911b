//! Scam Classifier Adapters
//!
//! - **PatternScamClassifier** - Weighted regex categories (default)
//! - **MockScamClassifier** - Scripted classifications for tests

mod mock_classifier;
mod pattern_classifier;

pub use mock_classifier::MockScamClassifier;
pub use pattern_classifier::PatternScamClassifier;
