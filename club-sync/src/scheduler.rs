//! Periodic group reconciliation
//!
//! Runs once at start-up, then every `GROUP_SYNC_INTERVAL_SECS`. A failed
//! run is logged and retried on the next tick.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::services::SyncService;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

pub struct GroupSyncScheduler {
    service: SyncService,
    interval: Duration,
    shutdown: CancellationToken,
}

impl GroupSyncScheduler {
    /// Intervals shorter than one second are raised to one second
    pub fn new(service: SyncService, interval: Duration, shutdown: CancellationToken) -> Self {
        if interval < MIN_INTERVAL {
            tracing::warn!(?interval, "Group sync interval too short, using 1s");
        }
        Self {
            service,
            interval: interval.max(MIN_INTERVAL),
            shutdown,
        }
    }

    /// Main loop: immediate run, then one per interval until shutdown
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Group sync scheduler started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                // The first tick completes immediately
                _ = ticker.tick() => {
                    self.sync_once().await;
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Group sync scheduler received shutdown signal");
                    return;
                }
            }
        }
    }

    async fn sync_once(&self) {
        if let Err(e) = self.service.reconcile_groups().await {
            tracing::error!(error = %e, "Scheduled group sync failed");
        }
    }
}
