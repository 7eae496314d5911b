//! Raw facts extracted from one message.

use serde::{Deserialize, Serialize};

use super::EvidenceKind;

/// Structured extraction result for a single turn, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFacts {
    pub bank_accounts: Vec<String>,
    pub upi_ids: Vec<String>,
    pub phishing_links: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub suspicious_keywords: Vec<String>,
    /// Behavioural annotations proposed by the extractor.
    pub notes: Vec<String>,
}

impl ExtractedFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bank_account(mut self, value: impl Into<String>) -> Self {
        self.bank_accounts.push(value.into());
        self
    }

    pub fn with_upi_id(mut self, value: impl Into<String>) -> Self {
        self.upi_ids.push(value.into());
        self
    }

    pub fn with_phishing_link(mut self, value: impl Into<String>) -> Self {
        self.phishing_links.push(value.into());
        self
    }

    pub fn with_phone_number(mut self, value: impl Into<String>) -> Self {
        self.phone_numbers.push(value.into());
        self
    }

    pub fn with_keyword(mut self, value: impl Into<String>) -> Self {
        self.suspicious_keywords.push(value.into());
        self
    }

    pub fn with_note(mut self, value: impl Into<String>) -> Self {
        self.notes.push(value.into());
        self
    }

    /// Iterates every fact with its category.
    pub fn iter(&self) -> impl Iterator<Item = (EvidenceKind, &str)> {
        fn tag(kind: EvidenceKind, values: &[String]) -> impl Iterator<Item = (EvidenceKind, &str)> {
            values.iter().map(move |v| (kind, v.as_str()))
        }

        tag(EvidenceKind::BankAccount, &self.bank_accounts)
            .chain(tag(EvidenceKind::UpiId, &self.upi_ids))
            .chain(tag(EvidenceKind::PhishingLink, &self.phishing_links))
            .chain(tag(EvidenceKind::PhoneNumber, &self.phone_numbers))
            .chain(tag(EvidenceKind::SuspiciousKeyword, &self.suspicious_keywords))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none() && self.notes.is_empty()
    }
}
