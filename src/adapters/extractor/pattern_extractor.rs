//! Pattern-based intelligence extractor.
//!
//! Finds bank accounts, UPI handles, Indian phone numbers, suspicious links
//! and keywords in a single message. Values are returned raw; the aggregator
//! normalizes them on merge.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::domain::intelligence::ExtractedFacts;
use crate::ports::{CollaboratorError, IntelligenceExtractor};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+91[\-\s]?|\b91[\-\s]?|\b0|\b)[6-9]\d{9}\b").expect("phone pattern compiles")
});

static BANK_ACCOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{4}[\-\s]\d{4}[\-\s]\d{4}[\-\s]\d{4}\b|\b\d{9,18}\b")
        .expect("bank account pattern compiles")
});

static UPI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+").expect("upi pattern compiles"));

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)https?://[^\s<>"']+|www\.[^\s<>"']+|\b(?:bit\.ly|tinyurl\.com|t\.co)/\S+|\b[\w\-]+(?:\.[\w\-]+)*\.(?:com|in|org|net|xyz|tk|ml|ga|cf)/\S*"#,
    )
    .expect("link pattern compiles")
});

static KEYWORD_RES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SUSPICIOUS_KEYWORDS
        .iter()
        .map(|kw| {
            let pattern = format!(r"(?i)\b{}\b", kw.replace(' ', r"\s+"));
            (*kw, Regex::new(&pattern).expect("keyword pattern compiles"))
        })
        .collect()
});

const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "urgent", "immediately", "now", "asap", "blocked", "suspended", "verify", "confirm",
    "update", "otp", "pin", "password", "cvv", "bank", "rbi", "government", "official",
    "account", "upi", "paytm", "gpay", "phonepe", "transfer", "payment", "kyc", "aadhaar",
    "pan", "prize", "lottery", "winner", "reward", "cashback", "refund", "claim", "expire",
    "deadline", "legal action", "police", "arrest", "court", "penalty",
];

/// Domains that host legitimate links and are never reported.
const SAFE_DOMAINS: &[&str] = &[
    "google.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "youtube.com",
    "linkedin.com",
];

/// Mail providers whose addresses look like UPI handles.
const EMAIL_PROVIDERS: &[&str] = &["gmail", "yahoo", "hotmail", "outlook", "email"];

/// Regex extractor tuned for Indian payment scams.
#[derive(Debug, Clone, Default)]
pub struct PatternIntelligenceExtractor;

impl PatternIntelligenceExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous extraction, used by the port implementation.
    pub fn extract_facts(&self, text: &str) -> ExtractedFacts {
        let (phone_numbers, phone_digits) = phones(text);
        ExtractedFacts {
            bank_accounts: bank_accounts(text, &phone_digits),
            upi_ids: upi_ids(text),
            phishing_links: links(text),
            phone_numbers,
            suspicious_keywords: keywords(text),
            notes: Vec::new(),
        }
    }
}

#[async_trait]
impl IntelligenceExtractor for PatternIntelligenceExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractedFacts, CollaboratorError> {
        Ok(self.extract_facts(text))
    }
}

fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// Phone numbers formatted `+91XXXXXXXXXX`, plus the raw digit runs they came from.
fn phones(text: &str) -> (Vec<String>, HashSet<String>) {
    let mut formatted = Vec::new();
    let mut raw = HashSet::new();
    for m in PHONE_RE.find_iter(text) {
        let all = digits(m.as_str());
        let local = match all.len() {
            12 if all.starts_with("91") => &all[2..],
            11 if all.starts_with('0') => &all[1..],
            10 => all.as_str(),
            _ => continue,
        };
        let phone = format!("+91{}", local);
        if !formatted.contains(&phone) {
            formatted.push(phone);
        }
        raw.insert(all.clone());
        raw.insert(local.to_string());
    }
    (formatted, raw)
}

fn bank_accounts(text: &str, phone_digits: &HashSet<String>) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in BANK_ACCOUNT_RE.find_iter(text) {
        let clean = digits(m.as_str());
        if phone_digits.contains(&clean) || found.contains(&clean) {
            continue;
        }
        found.push(clean);
    }
    found
}

fn upi_ids(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in UPI_RE.find_iter(text) {
        let candidate = m.as_str().trim_end_matches(['.', '-']);
        let Some((name, provider)) = candidate.split_once('@') else {
            continue;
        };
        if name.is_empty() || provider.is_empty() || provider.contains('.') {
            continue;
        }
        let provider_lower = provider.to_lowercase();
        if EMAIL_PROVIDERS.contains(&provider_lower.as_str()) {
            continue;
        }
        let handle = candidate.to_string();
        if !found.iter().any(|f| f.eq_ignore_ascii_case(&handle)) {
            found.push(handle);
        }
    }
    found
}

fn links(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in LINK_RE.find_iter(text) {
        let link = m.as_str();
        let lower = link.to_lowercase();
        if SAFE_DOMAINS.iter().any(|d| lower.contains(d)) {
            continue;
        }
        if !found.iter().any(|f| f == link) {
            found.push(link.to_string());
        }
    }
    found
}

fn keywords(text: &str) -> Vec<String> {
    KEYWORD_RES
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(kw, _)| kw.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> ExtractedFacts {
        PatternIntelligenceExtractor::new().extract_facts(text)
    }

    #[test]
    fn finds_upi_handles_but_not_emails() {
        let facts = extract("Pay to scammer@upi or fraud.desk@ybl, not me@gmail.com or me@gmail");
        assert_eq!(facts.upi_ids, vec!["scammer@upi", "fraud.desk@ybl"]);
    }

    #[test]
    fn formats_indian_phone_numbers() {
        let facts = extract("Call +91 9876543210 or 09876543210 or 8765432109 now");
        assert_eq!(facts.phone_numbers, vec!["+919876543210", "+918765432109"]);
    }

    #[test]
    fn phone_numbers_are_not_bank_accounts() {
        let facts = extract("Call 9876543210. Deposit into 123456789012.");
        assert_eq!(facts.bank_accounts, vec!["123456789012"]);
        assert_eq!(facts.phone_numbers, vec!["+919876543210"]);
    }

    #[test]
    fn grouped_card_style_account_numbers() {
        let facts = extract("Account 1234-5678-9012-3456 will be debited");
        assert_eq!(facts.bank_accounts, vec!["1234567890123456"]);
    }

    #[test]
    fn finds_links_and_skips_safe_domains() {
        let facts = extract(
            "Verify at https://sbi-kyc.xyz/login?id=1 or bit.ly/abc123 (see https://www.google.com/help)",
        );
        assert_eq!(
            facts.phishing_links,
            vec!["https://sbi-kyc.xyz/login?id=1", "bit.ly/abc123"]
        );
    }

    #[test]
    fn keywords_match_whole_words() {
        let facts = extract("URGENT: your account is blocked, legal action follows. Our company...");
        assert!(facts.suspicious_keywords.contains(&"urgent".to_string()));
        assert!(facts.suspicious_keywords.contains(&"blocked".to_string()));
        assert!(facts.suspicious_keywords.contains(&"legal action".to_string()));
        assert!(!facts.suspicious_keywords.contains(&"pan".to_string()));
    }

    #[test]
    fn plain_text_yields_nothing() {
        assert!(extract("Hello, how are you?").is_empty());
    }
}
