//! HTTP report sink.
//!
//! POSTs the final report as JSON to the evaluator endpoint. One call is one
//! attempt; any 2xx counts as delivered.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::report::FinalReport;
use crate::ports::{DeliveryError, ReportSink};

/// Report sink backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpReportSink {
    client: Client,
    url: String,
}

impl HttpReportSink {
    /// Creates a sink posting to `url` with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReportSink for HttpReportSink {
    async fn deliver(&self, report: &FinalReport) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(report)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                session_id = %report.session_id,
                status = status.as_u16(),
                "Evaluator accepted report"
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Status {
            code: status.as_u16(),
            body,
        })
    }
}
