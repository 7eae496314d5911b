//! Report Sink Port - Delivers the final report to the external evaluator.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::report::FinalReport;

/// One failed delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The evaluator answered with a non-2xx status.
    #[error("evaluator returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// The attempt exceeded its deadline.
    #[error("delivery timed out")]
    Timeout,

    /// Connection, TLS or encoding failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl DeliveryError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::DeliveryFailed
    }
}

/// Port for report delivery.
///
/// One call is one attempt; retries belong to the caller.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, report: &FinalReport) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_sink_is_object_safe() {
        fn _accepts_dyn(_sink: &dyn ReportSink) {}
    }

    #[test]
    fn status_error_names_code() {
        let err = DeliveryError::Status {
            code: 503,
            body: "busy".into(),
        };
        assert_eq!(err.to_string(), "evaluator returned HTTP 503: busy");
    }
}
