//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Creates a new timestamp by subtracting the specified number of seconds.
    ///
    /// Saturates at the earliest representable instant.
    pub fn minus_secs(&self, secs: u64) -> Self {
        i64::try_from(secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|d| self.0.checked_sub_signed(d))
            .map(Self)
            .unwrap_or(Self(DateTime::<Utc>::MIN_UTC))
    }

    /// Formats as RFC 3339 for API responses.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn minus_secs_moves_backwards() {
        let now = Timestamp::now();
        let earlier = now.minus_secs(60);

        assert!(earlier.is_before(&now));
        assert_eq!(now.duration_since(&earlier).num_seconds(), 60);
    }

    #[test]
    fn minus_secs_saturates_on_huge_values() {
        let now = Timestamp::now();

        let floor = Timestamp::from_datetime(DateTime::<Utc>::MIN_UTC);
        assert_eq!(now.minus_secs(10_u64.pow(13)), floor);
        assert_eq!(now.minus_secs(u64::MAX), floor);
    }

    #[test]
    fn serializes_transparently() {
        let ts = Timestamp::from_datetime(
            DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-01-02T03:04:05Z\"");
    }
}
