//! Pattern-based scam classifier.
//!
//! Scores a message by weighted regex categories. Each category contributes
//! `weight` per matching pattern up to its `cap`; the sum is the message
//! score. A small diversity bonus rewards distinct indicators seen across the
//! counterpart's messages so far.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::domain::engagement::{Classification, Verdict};
use crate::domain::session::{Message, Sender};
use crate::ports::{CollaboratorError, ScamClassifier};

struct Category {
    weight: f64,
    cap: f64,
    patterns: Vec<Regex>,
}

impl Category {
    fn new(weight: f64, cap: f64, patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){}", p)).expect("classifier pattern compiles"))
            .collect();
        Self {
            weight,
            cap,
            patterns,
        }
    }

    fn score(&self, text: &str) -> f64 {
        let hits = self.patterns.iter().filter(|p| p.is_match(text)).count();
        (hits as f64 * self.weight).min(self.cap)
    }

    fn indicators<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.patterns
            .iter()
            .flat_map(move |p| p.find_iter(text).map(|m| m.as_str().to_lowercase()))
    }
}

static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        // urgency
        Category::new(
            0.05,
            0.15,
            &[
                r"\burgent\b",
                r"\bimmediately\b",
                r"\btoday\b",
                r"\bnow\b",
                r"\basap\b",
                r"\bhurry\b",
                r"\blast\s+chance\b",
                r"\blimited\s+time\b",
                r"\bexpir(?:e|ing|ed)\b",
                r"\bwithin\s+\d+\s*(?:min|mins|minutes|hours|hrs)\b",
                r"\bdeadline\b",
            ],
        ),
        // threats
        Category::new(
            0.08,
            0.25,
            &[
                r"\bblock(?:ed)?\b",
                r"\bsuspend(?:ed)?\b",
                r"\bdeactivat(?:e|ed)\b",
                r"\bfreez(?:e|ing)\b",
                r"\blegal\s+action\b",
                r"\barrest(?:ed)?\b",
                r"\bpolice\b",
                r"\bpenalt(?:y|ies)\b",
                r"\bwarrant\b",
                r"\bblacklisted\b",
            ],
        ),
        // requests
        Category::new(
            0.05,
            0.15,
            &[
                r"\bverif(?:y|ied)\b",
                r"\bconfirm(?:ed)?\b",
                r"\bupdat(?:e|ed)\b",
                r"\bshar(?:e|ed)\b",
                r"\bsend\b",
                r"\btransfer(?:red)?\b",
                r"\bpa(?:y|id)\b",
                r"\bclick(?:ed)?\b",
                r"\bsubmit(?:ted)?\b",
            ],
        ),
        // sensitive data
        Category::new(
            0.08,
            0.25,
            &[
                r"\botp\b",
                r"\bpin\b",
                r"\bpassword\b",
                r"\bcvv\b",
                r"\bcard\s+number\b",
                r"\baccount\s+number\b",
                r"\bupi\b",
                r"\baadhaar\b",
                r"\bkyc\b",
            ],
        ),
        // impersonation
        Category::new(
            0.05,
            0.10,
            &[
                r"\bbank\b",
                r"\brbi\b",
                r"\bsbi\b",
                r"\bhdfc\b",
                r"\bicici\b",
                r"\bcustomer\s+(?:care|service)\b",
                r"\bgovernment\b",
                r"\bofficials?\b",
                r"\b(?:security|verification|fraud)\s+(?:team|department)\b",
            ],
        ),
        // money lures
        Category::new(
            0.05,
            0.10,
            &[
                r"₹\s*\d+(?:\.\d+)?",
                r"\brs\.?\s*\d+(?:\.\d+)?",
                r"\brupees?\b",
                r"\bprize\b",
                r"\blotter(?:y|ies)\b",
                r"\bwinner\b",
                r"\bcashback\b",
                r"\breward\b",
                r"\brefund\b",
            ],
        ),
        // upi scams
        Category::new(
            0.10,
            0.20,
            &[
                r"(?:share|send|provide|give).*upi",
                r"upi.*(?:blocked|suspended|deactivated|frozen)",
                r"(?:verify|update|confirm|reactivate).*upi",
                r"upi.*mandate",
                r"collect.*request",
            ],
        ),
        // financial coercion
        Category::new(
            0.10,
            0.20,
            &[
                r"account.*(?:blocked|suspended|frozen|closed)",
                r"(?:block|suspend|freeze|close).*account",
                r"card.*(?:blocked|suspended|deactivated)",
                r"update.*kyc.*(?:immediately|today|now)",
                r"kyc.*(?:pending|incomplete|failed)",
            ],
        ),
    ]
});

/// Regex-weighted classifier with built-in verdict cutoffs.
#[derive(Debug, Clone)]
pub struct PatternScamClassifier {
    suspicious_at: f64,
    scam_at: f64,
}

impl Default for PatternScamClassifier {
    fn default() -> Self {
        Self {
            suspicious_at: 0.3,
            scam_at: 0.51,
        }
    }
}

impl PatternScamClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score of a single text, before the diversity bonus.
    pub fn message_score(&self, text: &str) -> f64 {
        CATEGORIES
            .iter()
            .map(|c| c.score(text))
            .sum::<f64>()
            .min(1.0)
    }

    fn diversity_bonus(&self, text: &str, history: &[Message]) -> f64 {
        let indicators: BTreeSet<String> = history
            .iter()
            .filter(|m| m.sender == Sender::Scammer)
            .map(|m| m.text.as_str())
            .chain(std::iter::once(text))
            .flat_map(|t| CATEGORIES.iter().flat_map(move |c| c.indicators(t)))
            .collect();
        (indicators.len() as f64 * 0.02).min(0.2)
    }

    fn verdict(&self, score: f64) -> Verdict {
        if score >= self.scam_at {
            Verdict::Scam
        } else if score >= self.suspicious_at {
            Verdict::Suspicious
        } else {
            Verdict::Benign
        }
    }
}

#[async_trait]
impl ScamClassifier for PatternScamClassifier {
    async fn classify(
        &self,
        text: &str,
        history: &[Message],
    ) -> Result<Classification, CollaboratorError> {
        let score = (self.message_score(text) + self.diversity_bonus(text, history)).min(1.0);
        Ok(Classification::new(score, self.verdict(score)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::MessageTimestamp;

    #[tokio::test]
    async fn greeting_is_benign() {
        let c = PatternScamClassifier::new()
            .classify("Hi, how was your weekend?", &[])
            .await
            .unwrap();
        assert_eq!(c.verdict, Verdict::Benign);
        assert!(c.score < 0.3);
    }

    #[tokio::test]
    async fn account_threat_is_at_least_suspicious() {
        let c = PatternScamClassifier::new()
            .classify(
                "Your bank account will be blocked today. Verify immediately.",
                &[],
            )
            .await
            .unwrap();
        assert!(c.verdict >= Verdict::Suspicious, "score was {}", c.score);
    }

    #[tokio::test]
    async fn upi_coercion_is_scam() {
        let c = PatternScamClassifier::new()
            .classify(
                "URGENT: your account is blocked. Share your UPI PIN and OTP now to avoid legal action",
                &[],
            )
            .await
            .unwrap();
        assert_eq!(c.verdict, Verdict::Scam);
        assert!(c.score <= 1.0);
    }

    #[test]
    fn category_caps_bound_repeated_hits() {
        let classifier = PatternScamClassifier::new();
        let single = classifier.message_score("urgent");
        let many = classifier.message_score("urgent now today asap hurry deadline immediately");
        assert!(many > single);
        assert!(many <= 0.15 + f64::EPSILON);
    }

    #[tokio::test]
    async fn history_adds_diversity_bonus() {
        let classifier = PatternScamClassifier::new();
        let history = vec![
            Message::from_scammer("This is the RBI fraud department", MessageTimestamp::EpochMillis(1)),
            Message::from_user("Oh no, what happened?", MessageTimestamp::EpochMillis(2)),
        ];
        let alone = classifier.classify("send the otp", &[]).await.unwrap();
        let with_context = classifier.classify("send the otp", &history).await.unwrap();
        assert!(with_context.score > alone.score);
    }
}
