//! Recording report sink for testing.
//!
//! Records every report it is asked to deliver. Queued failures are returned
//! first, one per call; after that every call succeeds.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::report::FinalReport;
use crate::ports::{DeliveryError, ReportSink};

/// In-memory report sink.
#[derive(Debug, Clone, Default)]
pub struct RecordingReportSink {
    failures: Arc<Mutex<VecDeque<DeliveryError>>>,
    always_fail: Option<DeliveryError>,
    delay: Duration,
    attempts: Arc<Mutex<Vec<FinalReport>>>,
    delivered: Arc<Mutex<Vec<FinalReport>>>,
}

impl RecordingReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a failure for the next attempt.
    pub fn with_failure(self, error: DeliveryError) -> Self {
        self.failures.lock().unwrap().push_back(error);
        self
    }

    /// Fails every attempt that has no queued failure.
    pub fn always_failing(mut self, error: DeliveryError) -> Self {
        self.always_fail = Some(error);
        self
    }

    /// Sets simulated latency per attempt.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of deliver calls, successful or not.
    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    /// Reports that were accepted.
    pub fn delivered(&self) -> Vec<FinalReport> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn delivered_count(&self) -> usize {
        self.delivered.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportSink for RecordingReportSink {
    async fn deliver(&self, report: &FinalReport) -> Result<(), DeliveryError> {
        self.attempts.lock().unwrap().push(report.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let queued = self.failures.lock().unwrap().pop_front();
        if let Some(err) = queued.or_else(|| self.always_fail.clone()) {
            return Err(err);
        }

        self.delivered.lock().unwrap().push(report.clone());
        Ok(())
    }
}
