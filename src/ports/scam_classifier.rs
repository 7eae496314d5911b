//! Scam Classifier Port - Scores a message for malicious intent.

use async_trait::async_trait;

use super::CollaboratorError;
use crate::domain::engagement::Classification;
use crate::domain::session::Message;

/// Port for message classification.
///
/// Implementations decide how text is scored; the engine only compares the
/// result against its policy thresholds.
#[async_trait]
pub trait ScamClassifier: Send + Sync {
    /// Classifies `text` in the context of the conversation so far.
    async fn classify(
        &self,
        text: &str,
        history: &[Message],
    ) -> Result<Classification, CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scam_classifier_is_object_safe() {
        fn _accepts_dyn(_classifier: &dyn ScamClassifier) {}
    }
}
