//! Canonical forms for extracted facts.
//!
//! Every value is normalized before it enters a session's evidence sets so
//! that the same fact seen twice, in different casing or formatting, counts
//! once.

use url::Url;

/// Query parameters that only carry campaign/click tracking.
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "dclid", "gbraid", "wbraid", "msclkid", "mc_cid", "mc_eid", "igshid",
    "yclid", "twclid", "ttclid", "_ga", "_gl", "ref_src",
];

/// Characters that commonly trail a link or handle pasted into prose.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '\'', '"', '>'];

/// Lowercases and trims a keyword, collapsing inner whitespace.
pub fn keyword(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    non_empty(collapsed.to_lowercase())
}

/// Reduces a phone number to its digits.
pub fn phone_number(raw: &str) -> Option<String> {
    non_empty(raw.chars().filter(char::is_ascii_digit).collect())
}

/// Trims a UPI handle while preserving case.
///
/// Requires a single `@` with a non-empty name and provider.
pub fn upi_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches(TRAILING_PUNCTUATION);
    let (name, provider) = trimmed.split_once('@')?;
    if name.is_empty() || provider.is_empty() || provider.contains('@') {
        return None;
    }
    if trimmed.chars().any(char::is_whitespace) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Membership key for UPI handles: comparison ignores case.
pub fn upi_key(normalized: &str) -> String {
    normalized.to_lowercase()
}

/// Strips separators from an account number and uppercases it.
pub fn bank_account(raw: &str) -> Option<String> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !compact.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    non_empty(compact.to_uppercase())
}

/// Normalizes a URL to scheme + host + path, minus tracking parameters.
///
/// Links without a scheme are treated as `http`. Credentials and fragments
/// are dropped; the host is lowercased by the URL parser. Non-tracking query
/// parameters are kept in their original order.
pub fn link(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches(TRAILING_PUNCTUATION);
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let mut url = Url::parse(&candidate).ok()?;
    if url.host_str().map_or(true, str::is_empty) {
        return None;
    }

    url.set_fragment(None);
    // Both setters only fail for cannot-be-a-base URLs, which have no host.
    let _ = url.set_username("");
    let _ = url.set_password(None);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    Some(url.to_string())
}

fn is_tracking_param(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.starts_with("utm_") || TRACKING_PARAMS.contains(&lower.as_str())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_is_trimmed_and_lowercased() {
        assert_eq!(keyword("  URGENT "), Some("urgent".to_string()));
        assert_eq!(keyword("Legal   Action"), Some("legal action".to_string()));
        assert_eq!(keyword("   "), None);
    }

    #[test]
    fn phone_number_keeps_digits_only() {
        assert_eq!(phone_number("+91 98765-43210"), Some("919876543210".to_string()));
        assert_eq!(phone_number("(022) 555 0199"), Some("0225550199".to_string()));
        assert_eq!(phone_number("call me"), None);
    }

    #[test]
    fn upi_id_preserves_case_but_keys_ignore_it() {
        let normalized = upi_id(" Scammer.Pay@YBL. ").unwrap();
        assert_eq!(normalized, "Scammer.Pay@YBL");
        assert_eq!(upi_key(&normalized), "scammer.pay@ybl");
    }

    #[test]
    fn upi_id_requires_name_and_provider() {
        assert_eq!(upi_id("@upi"), None);
        assert_eq!(upi_id("name@"), None);
        assert_eq!(upi_id("noatsign"), None);
        assert_eq!(upi_id("a@b@c"), None);
    }

    #[test]
    fn bank_account_strips_separators() {
        assert_eq!(
            bank_account("1234 5678-9012 3456"),
            Some("1234567890123456".to_string())
        );
        assert_eq!(bank_account("sbin0001234"), Some("SBIN0001234".to_string()));
        assert_eq!(bank_account("12/34"), None);
    }

    #[test]
    fn link_adds_scheme_and_lowercases_host() {
        assert_eq!(
            link("WWW.Secure-Bank.XYZ/Verify"),
            Some("http://www.secure-bank.xyz/Verify".to_string())
        );
    }

    #[test]
    fn link_strips_tracking_parameters_and_fragment() {
        assert_eq!(
            link("https://pay.example.in/kyc?id=42&utm_source=sms&fbclid=abc#top"),
            Some("https://pay.example.in/kyc?id=42".to_string())
        );
        assert_eq!(
            link("https://pay.example.in/kyc?utm_campaign=x"),
            Some("https://pay.example.in/kyc".to_string())
        );
    }

    #[test]
    fn link_drops_embedded_credentials() {
        assert_eq!(
            link("http://bank.com@evil.example/login"),
            Some("http://evil.example/login".to_string())
        );
    }

    #[test]
    fn link_trims_trailing_punctuation() {
        assert_eq!(
            link("http://bit.ly/abc123."),
            Some("http://bit.ly/abc123".to_string())
        );
    }

    #[test]
    fn link_rejects_garbage() {
        assert_eq!(link(""), None);
        assert_eq!(link("http://"), None);
    }

    #[test]
    fn link_normalization_is_idempotent() {
        let once = link("HTTPS://Example.COM/a/b?x=1&utm_medium=y").unwrap();
        assert_eq!(link(&once), Some(once.clone()));
    }
}
