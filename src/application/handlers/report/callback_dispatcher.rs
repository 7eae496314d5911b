//! CallbackDispatcher - Delivers the final report at most once per session.
//!
//! Three layers keep a session from being reported twice:
//!
//! 1. An in-process in-flight guard: at most one outbound call per session.
//! 2. A re-read of the session after the guard is taken.
//! 3. The version-checked commit of `callback_sent`, which turns a late
//!    second delivery into `DuplicatePrevented`.
//!
//! A global semaphore bounds concurrent deliveries across sessions. No store
//! lock is held while the evaluator is being called.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

use super::RetryPolicy;
use crate::domain::foundation::SessionId;
use crate::domain::report::FinalReport;
use crate::domain::session::{Session, SessionError};
use crate::ports::{DeliveryError, ReportSink, SessionStore};

pub const DEFAULT_MAX_CONCURRENT_DELIVERIES: usize = 8;

/// What a trigger did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Session is not `Confirmed`-and-unsent, or does not exist.
    NotEligible,
    /// Another trigger in this process is delivering the same session.
    AlreadyInFlight,
    /// Delivered and committed.
    Delivered { attempts: u32 },
    /// Delivered, but another trigger had already committed the report.
    DuplicatePrevented,
    /// Delivered, but the commit failed; the session stays pending.
    CommitFailed { attempts: u32, error: String },
    /// Every attempt failed; the session stays pending.
    Undelivered { attempts: u32, last_error: String },
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered { .. })
    }
}

/// Removes the session from the in-flight set when dropped.
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<SessionId>>>,
    session_id: SessionId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.session_id);
    }
}

/// Dispatcher for final reports.
#[derive(Clone)]
pub struct CallbackDispatcher {
    store: Arc<dyn SessionStore>,
    sink: Arc<dyn ReportSink>,
    retry: RetryPolicy,
    in_flight: Arc<Mutex<HashSet<SessionId>>>,
    permits: Arc<Semaphore>,
}

impl CallbackDispatcher {
    pub fn new(store: Arc<dyn SessionStore>, sink: Arc<dyn ReportSink>) -> Self {
        Self {
            store,
            sink,
            retry: RetryPolicy::default(),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            permits: Arc::new(Semaphore::new(DEFAULT_MAX_CONCURRENT_DELIVERIES)),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Caps concurrent deliveries across all sessions. Zero is raised to one.
    pub fn with_max_concurrent_deliveries(mut self, max: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(max.max(1)));
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Delivers the report if the session is confirmed and not yet reported.
    ///
    /// Never returns an error: every failure is logged and folded into the
    /// outcome.
    pub async fn trigger_if_eligible(&self, session_id: &SessionId) -> DispatchOutcome {
        if self.load_pending(session_id).await.is_none() {
            return DispatchOutcome::NotEligible;
        }

        let Some(_guard) = self.try_acquire(session_id) else {
            tracing::debug!(session_id = %session_id, "Delivery already in flight");
            return DispatchOutcome::AlreadyInFlight;
        };

        let _permit = match self.permits.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                tracing::error!(session_id = %session_id, "Delivery semaphore closed");
                return DispatchOutcome::NotEligible;
            }
        };

        // Another trigger may have finished between the first read and the guard.
        let Some(session) = self.load_pending(session_id).await else {
            return DispatchOutcome::NotEligible;
        };

        let report = FinalReport::from_session(&session);
        match self.deliver_with_retry(&report).await {
            Ok(attempts) => self.commit_delivery(session_id, attempts).await,
            Err((attempts, err)) => self.record_failure(session_id, attempts, err).await,
        }
    }

    /// Runs [`Self::trigger_if_eligible`] on its own task.
    pub fn spawn_trigger(&self, session_id: SessionId) -> JoinHandle<DispatchOutcome> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.trigger_if_eligible(&session_id).await })
    }

    /// Sessions that are confirmed but whose report has not gone out.
    pub async fn pending_undelivered(&self) -> Result<Vec<Session>, SessionError> {
        self.store.list_pending_delivery().await
    }

    /// Re-triggers every pending session. Returns one outcome per session.
    pub async fn redeliver_pending(&self) -> Result<Vec<(SessionId, DispatchOutcome)>, SessionError> {
        let pending = self.pending_undelivered().await?;
        let triggers = pending.into_iter().map(|session| {
            let id = session.session_id().clone();
            async move {
                let outcome = self.trigger_if_eligible(&id).await;
                (id, outcome)
            }
        });
        Ok(futures::future::join_all(triggers).await)
    }

    async fn load_pending(&self, session_id: &SessionId) -> Option<Session> {
        match self.store.get(session_id).await {
            Ok(session) if session.is_pending_delivery() => Some(session),
            Ok(_) => None,
            Err(SessionError::NotFound(_)) => None,
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Could not load session for delivery");
                None
            }
        }
    }

    fn try_acquire(&self, session_id: &SessionId) -> Option<InFlightGuard> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(session_id.clone()) {
            return None;
        }
        Some(InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            session_id: session_id.clone(),
        })
    }

    /// Returns the attempt that succeeded, or the attempt count and last error.
    async fn deliver_with_retry(&self, report: &FinalReport) -> Result<u32, (u32, DeliveryError)> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = DeliveryError::Transport("no attempts made".to_string());

        for attempt in 1..=max_attempts {
            let result = match timeout(self.retry.attempt_timeout, self.sink.deliver(report)).await {
                Ok(result) => result,
                Err(_) => Err(DeliveryError::Timeout),
            };

            match result {
                Ok(()) => return Ok(attempt),
                Err(err) => {
                    tracing::warn!(
                        session_id = %report.session_id,
                        attempt,
                        max_attempts,
                        error = %err,
                        "Report delivery attempt failed"
                    );
                    last_error = err;
                }
            }

            if attempt < max_attempts {
                sleep(self.retry.backoff(attempt)).await;
            }
        }

        Err((max_attempts, last_error))
    }

    async fn commit_delivery(&self, session_id: &SessionId, attempts: u32) -> DispatchOutcome {
        match self
            .store
            .update(session_id, &|s: &mut Session| s.mark_reported())
            .await
        {
            Ok(_) => {
                tracing::info!(session_id = %session_id, attempts, "Final report delivered");
                DispatchOutcome::Delivered { attempts }
            }
            Err(SessionError::AlreadyReported(_)) => {
                tracing::warn!(
                    session_id = %session_id,
                    "Duplicate delivery prevented: report was already committed"
                );
                DispatchOutcome::DuplicatePrevented
            }
            Err(e) => {
                tracing::error!(
                    session_id = %session_id,
                    error = %e,
                    "Report delivered but commit failed"
                );
                DispatchOutcome::CommitFailed {
                    attempts,
                    error: e.to_string(),
                }
            }
        }
    }

    async fn record_failure(
        &self,
        session_id: &SessionId,
        attempts: u32,
        err: DeliveryError,
    ) -> DispatchOutcome {
        let last_error = err.to_string();
        tracing::error!(
            session_id = %session_id,
            attempts,
            error = %last_error,
            "Report delivery exhausted retries; session left pending"
        );

        let record = |s: &mut Session| -> Result<(), SessionError> {
            s.record_delivery_failure(attempts, last_error.clone());
            Ok(())
        };
        if let Err(e) = self.store.update(session_id, &record).await {
            tracing::warn!(session_id = %session_id, error = %e, "Could not record delivery failure");
        }

        DispatchOutcome::Undelivered {
            attempts,
            last_error,
        }
    }
}
