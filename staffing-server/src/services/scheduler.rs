//! Reconciliation scheduler
//!
//! Runs [`ReconcileService`] on a fixed interval until shutdown.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::reconcile::ReconcileService;

pub struct ReconcileScheduler {
    service: ReconcileService,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ReconcileScheduler {
    pub fn new(service: ReconcileService, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            service,
            interval,
            shutdown,
        }
    }

    /// Main loop: one pass at start-up, then one per interval
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Reconcile scheduler started");

        self.pass().await;
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => self.pass().await,
                _ = self.shutdown.cancelled() => break,
            }
        }

        tracing::info!("Reconcile scheduler stopped");
    }

    async fn pass(&self) {
        match self.service.run().await {
            Ok(report) if report.is_clean() => {}
            Ok(report) => tracing::warn!(?report, "Reconciliation repaired drift"),
            Err(e) => tracing::error!(error = %e, "Reconciliation failed"),
        }
    }
}
