//! Engagement policy configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::engagement::EngagementPolicy;

/// Thresholds for phase evaluation and collaborator deadlines.
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementConfig {
    #[serde(default = "default_suspicion")]
    pub suspicion_threshold: f64,

    #[serde(default = "default_confirmation")]
    pub confirmation_threshold: f64,

    #[serde(default = "default_min_hard_evidence")]
    pub min_hard_evidence: usize,

    /// Counterpart turns that confirm a strong signal without hard evidence.
    /// Zero disables the turn-count path.
    #[serde(default = "default_confirm_after_turns")]
    pub confirm_after_turns: usize,

    /// Deadline for each classifier, extractor and generator call
    #[serde(default = "default_collaborator_timeout")]
    pub collaborator_timeout_ms: u64,
}

impl EngagementConfig {
    pub fn policy(&self) -> EngagementPolicy {
        EngagementPolicy {
            suspicion_threshold: self.suspicion_threshold,
            confirmation_threshold: self.confirmation_threshold,
            min_hard_evidence: self.min_hard_evidence,
            confirm_after_turns: (self.confirm_after_turns > 0).then_some(self.confirm_after_turns),
        }
    }

    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_millis(self.collaborator_timeout_ms)
    }

    /// Validate engagement configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.policy()
            .validate()
            .map_err(|e| ValidationError::InvalidThresholds(e.to_string()))?;
        if self.collaborator_timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            suspicion_threshold: default_suspicion(),
            confirmation_threshold: default_confirmation(),
            min_hard_evidence: default_min_hard_evidence(),
            confirm_after_turns: default_confirm_after_turns(),
            collaborator_timeout_ms: default_collaborator_timeout(),
        }
    }
}

fn default_suspicion() -> f64 {
    0.3
}

fn default_confirmation() -> f64 {
    0.6
}

fn default_min_hard_evidence() -> usize {
    1
}

fn default_confirm_after_turns() -> usize {
    3
}

fn default_collaborator_timeout() -> u64 {
    5_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_defaults() {
        assert_eq!(EngagementConfig::default().policy(), EngagementPolicy::default());
    }

    #[test]
    fn test_zero_turns_disables_turn_path() {
        let config = EngagementConfig {
            confirm_after_turns: 0,
            ..Default::default()
        };
        assert_eq!(config.policy().confirm_after_turns, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = EngagementConfig {
            suspicion_threshold: 0.9,
            confirmation_threshold: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidThresholds(_))
        ));
    }
}
