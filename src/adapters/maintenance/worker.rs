//! MaintenanceWorker - Background sweep for report redelivery and idle expiry.
//!
//! Each tick:
//! 1. Re-triggers delivery for every confirmed session whose report is not out
//! 2. Purges sessions idle longer than the TTL, when one is configured
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `sweep_interval` | 60s | Time between sweeps |
//! | `session_ttl` | none | Idle time after which a session is purged |
//!
//! ## Graceful Shutdown
//!
//! The worker listens on a watch channel and runs one final sweep before
//! stopping.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::application::handlers::report::CallbackDispatcher;
use crate::domain::foundation::Timestamp;
use crate::ports::SessionStore;

/// Configuration for the maintenance worker.
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    pub sweep_interval: Duration,
    pub session_ttl: Option<Duration>,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(60),
            session_ttl: None,
        }
    }
}

impl MaintenanceConfig {
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = Some(ttl);
        self
    }
}

/// What one sweep did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub redelivered: usize,
    pub still_pending: usize,
    pub purged: u64,
}

/// Background maintenance service.
pub struct MaintenanceWorker {
    store: Arc<dyn SessionStore>,
    dispatcher: CallbackDispatcher,
    config: MaintenanceConfig,
}

impl MaintenanceWorker {
    pub fn new(
        store: Arc<dyn SessionStore>,
        dispatcher: CallbackDispatcher,
        config: MaintenanceConfig,
    ) -> Self {
        Self {
            store,
            dispatcher,
            config,
        }
    }

    /// Run the sweep loop until shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.sweep_once().await;
                        tracing::info!("Maintenance worker stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.sweep_once().await;
                }
            }
        }
    }

    /// Runs a single sweep. Failures are logged, never raised.
    pub async fn sweep_once(&self) -> SweepReport {
        let mut report = SweepReport::default();

        match self.dispatcher.redeliver_pending().await {
            Ok(outcomes) => {
                report.redelivered = outcomes.iter().filter(|(_, o)| o.is_delivered()).count();
                report.still_pending = outcomes.len() - report.redelivered;
            }
            Err(e) => tracing::warn!(error = %e, "Could not list sessions pending delivery"),
        }

        if let Some(ttl) = self.config.session_ttl {
            let cutoff = Timestamp::now().minus_secs(ttl.as_secs());
            match self.store.purge_idle_before(cutoff).await {
                Ok(purged) => report.purged = purged,
                Err(e) => tracing::warn!(error = %e, "Idle session purge failed"),
            }
        }

        if report != SweepReport::default() {
            tracing::info!(
                redelivered = report.redelivered,
                still_pending = report.still_pending,
                purged = report.purged,
                "Maintenance sweep finished"
            );
        }
        report
    }
}
