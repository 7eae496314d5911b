//! Agent notes derived from the accumulated keyword set.

use std::collections::BTreeSet;

/// Keyword groups that reveal a persuasion tactic, with the note they produce.
const TACTICS: &[(&[&str], &str)] = &[
    (&["urgent", "immediately", "asap", "now"], "Urgency tactics"),
    (&["blocked", "suspended", "legal action", "arrest"], "Fear/threat tactics"),
    (&["prize", "lottery", "winner", "reward", "cashback"], "Reward bait"),
    (&["bank", "rbi", "government", "official"], "Authority impersonation"),
    (&["otp", "pin", "password", "cvv"], "Credential harvesting"),
    (&["upi", "transfer", "payment"], "Payment redirection"),
];

/// Scam categories in priority order; the first group with a hit wins.
const CATEGORIES: &[(&[&str], &str)] = &[
    (&["bank", "account", "blocked", "suspended"], "Banking Fraud"),
    (&["otp", "pin", "password", "cvv"], "Credential Phishing"),
    (&["prize", "lottery", "winner", "reward"], "Lottery/Prize Scam"),
    (&["upi", "paytm", "gpay", "phonepe"], "UPI Fraud"),
    (&["kyc", "aadhaar", "pan"], "KYC Fraud"),
];

/// Tactic notes supported by the given normalized keywords, in table order.
pub fn tactic_notes(keywords: &BTreeSet<String>) -> Vec<String> {
    TACTICS
        .iter()
        .filter(|(triggers, _)| any_present(keywords, triggers))
        .map(|(_, note)| note.to_string())
        .collect()
}

/// The scam category suggested by the keywords, if any group matches.
pub fn scam_category(keywords: &BTreeSet<String>) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(triggers, _)| any_present(keywords, triggers))
        .map(|(_, category)| *category)
}

const CATEGORY_NOTE_PREFIX: &str = "Scam type: ";

/// Formats the category note.
pub fn category_note(category: &str) -> String {
    format!("{}{}", CATEGORY_NOTE_PREFIX, category)
}

/// True for a note produced by [`category_note`].
pub fn is_category_note(note: &str) -> bool {
    note.starts_with(CATEGORY_NOTE_PREFIX)
}

fn any_present(keywords: &BTreeSet<String>, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| keywords.contains(*t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn no_keywords_no_notes() {
        assert!(tactic_notes(&BTreeSet::new()).is_empty());
        assert_eq!(scam_category(&BTreeSet::new()), None);
    }

    #[test]
    fn tactics_follow_table_order() {
        let notes = tactic_notes(&set(&["otp", "urgent", "upi"]));
        assert_eq!(
            notes,
            vec!["Urgency tactics", "Credential harvesting", "Payment redirection"]
        );
    }

    #[test]
    fn multi_word_triggers_match_exactly() {
        assert_eq!(tactic_notes(&set(&["legal action"])), vec!["Fear/threat tactics"]);
        assert!(tactic_notes(&set(&["legal"])).is_empty());
    }

    #[test]
    fn banking_outranks_upi() {
        assert_eq!(scam_category(&set(&["upi", "blocked"])), Some("Banking Fraud"));
        assert_eq!(scam_category(&set(&["gpay"])), Some("UPI Fraud"));
    }

    #[test]
    fn category_note_format() {
        assert_eq!(category_note("KYC Fraud"), "Scam type: KYC Fraud");
    }
}
