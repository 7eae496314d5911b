//! Cumulative evidence sets and agent notes held by a session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::normalize;

/// Category of an extracted fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EvidenceKind {
    BankAccount,
    UpiId,
    PhishingLink,
    PhoneNumber,
    SuspiciousKeyword,
}

impl EvidenceKind {
    /// Hard evidence is anything actionable beyond a keyword hit.
    pub fn is_hard(&self) -> bool {
        !matches!(self, EvidenceKind::SuspiciousKeyword)
    }

    /// Canonical form of a raw value for this category.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        match self {
            EvidenceKind::BankAccount => normalize::bank_account(raw),
            EvidenceKind::UpiId => normalize::upi_id(raw),
            EvidenceKind::PhishingLink => normalize::link(raw),
            EvidenceKind::PhoneNumber => normalize::phone_number(raw),
            EvidenceKind::SuspiciousKeyword => normalize::keyword(raw),
        }
    }

    /// Key used for membership tests on normalized values.
    fn membership_key(&self, normalized: &str) -> String {
        match self {
            EvidenceKind::UpiId => normalize::upi_key(normalized),
            _ => normalized.to_string(),
        }
    }
}

/// The five deduplicated evidence sets of a session.
///
/// Sets only grow. Values are stored in normalized form and iterate in a
/// stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intelligence {
    bank_accounts: BTreeSet<String>,
    upi_ids: BTreeSet<String>,
    phishing_links: BTreeSet<String>,
    phone_numbers: BTreeSet<String>,
    suspicious_keywords: BTreeSet<String>,
}

impl Intelligence {
    pub fn bank_accounts(&self) -> &BTreeSet<String> {
        &self.bank_accounts
    }

    pub fn upi_ids(&self) -> &BTreeSet<String> {
        &self.upi_ids
    }

    pub fn phishing_links(&self) -> &BTreeSet<String> {
        &self.phishing_links
    }

    pub fn phone_numbers(&self) -> &BTreeSet<String> {
        &self.phone_numbers
    }

    pub fn suspicious_keywords(&self) -> &BTreeSet<String> {
        &self.suspicious_keywords
    }

    /// Returns the set backing a category.
    pub fn set(&self, kind: EvidenceKind) -> &BTreeSet<String> {
        match kind {
            EvidenceKind::BankAccount => &self.bank_accounts,
            EvidenceKind::UpiId => &self.upi_ids,
            EvidenceKind::PhishingLink => &self.phishing_links,
            EvidenceKind::PhoneNumber => &self.phone_numbers,
            EvidenceKind::SuspiciousKeyword => &self.suspicious_keywords,
        }
    }

    fn set_mut(&mut self, kind: EvidenceKind) -> &mut BTreeSet<String> {
        match kind {
            EvidenceKind::BankAccount => &mut self.bank_accounts,
            EvidenceKind::UpiId => &mut self.upi_ids,
            EvidenceKind::PhishingLink => &mut self.phishing_links,
            EvidenceKind::PhoneNumber => &mut self.phone_numbers,
            EvidenceKind::SuspiciousKeyword => &mut self.suspicious_keywords,
        }
    }

    /// Checks membership on normalized form.
    pub fn contains(&self, kind: EvidenceKind, raw: &str) -> bool {
        match kind.normalize(raw) {
            Some(normalized) => {
                let key = kind.membership_key(&normalized);
                self.set(kind)
                    .iter()
                    .any(|existing| kind.membership_key(existing) == key)
            }
            None => false,
        }
    }

    /// Normalizes and inserts a raw value. Returns true if the set grew.
    pub fn insert(&mut self, kind: EvidenceKind, raw: &str) -> bool {
        let Some(normalized) = kind.normalize(raw) else {
            return false;
        };
        let key = kind.membership_key(&normalized);
        let set = self.set_mut(kind);
        if set.iter().any(|existing| kind.membership_key(existing) == key) {
            return false;
        }
        set.insert(normalized)
    }

    /// Number of non-keyword items across all categories.
    pub fn hard_evidence_count(&self) -> usize {
        self.bank_accounts.len()
            + self.upi_ids.len()
            + self.phishing_links.len()
            + self.phone_numbers.len()
    }

    /// Total items across all categories.
    pub fn len(&self) -> usize {
        self.hard_evidence_count() + self.suspicious_keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Free-text annotations, deduplicated on the exact string, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentNotes(Vec<String>);

impl AgentNotes {
    /// Appends a note unless an identical one exists. Returns true if added.
    pub fn push_unique(&mut self, note: impl Into<String>) -> bool {
        let note = note.into();
        if note.trim().is_empty() || self.0.contains(&note) {
            return false;
        }
        self.0.push(note);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins the notes into the single summary string carried by reports.
    pub fn summary(&self) -> String {
        self.0.join("; ")
    }
}
