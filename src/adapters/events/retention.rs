//! RetentionSweeper - bounds the idempotency and outbox tables.
//!
//! `IdempotentHandler` records every handled event and the outbox keeps
//! every published entry. Neither is needed forever: a redelivery older than
//! the retention window is not expected, and a published entry has done its
//! job. The sweeper deletes both on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{OutboxWriter, ProcessedEventStore};

/// Rows removed by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub processed_events: u64,
    pub outbox_entries: u64,
}

pub struct RetentionSweeper {
    processed_events: Arc<dyn ProcessedEventStore>,
    outbox: Option<Arc<dyn OutboxWriter>>,
    retention: Duration,
    interval: Duration,
}

impl RetentionSweeper {
    /// Records older than `retention` are deleted every `interval`.
    pub fn new(
        processed_events: Arc<dyn ProcessedEventStore>,
        retention: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            processed_events,
            outbox: None,
            retention,
            interval,
        }
    }

    /// Also delete published outbox entries older than the retention window.
    pub fn with_outbox(mut self, outbox: Arc<dyn OutboxWriter>) -> Self {
        self.outbox = Some(outbox);
        self
    }

    fn cutoff(&self) -> Timestamp {
        let secs = i64::try_from(self.retention.as_secs()).unwrap_or(i64::MAX / 1_000);
        Timestamp::now().minus_seconds(secs)
    }

    /// Runs one sweep.
    pub async fn sweep_once(&self) -> Result<SweepReport, DomainError> {
        let cutoff = self.cutoff();
        let mut report = SweepReport {
            processed_events: self.processed_events.delete_before(cutoff).await?,
            ..SweepReport::default()
        };
        if let Some(outbox) = &self.outbox {
            report.outbox_entries = outbox.cleanup_old(cutoff).await?;
        }

        if report != SweepReport::default() {
            tracing::info!(
                processed_events = report.processed_events,
                outbox_entries = report.outbox_entries,
                "expired records deleted"
            );
        }
        Ok(report)
    }

    /// Sweeps every `interval` until `shutdown` turns true, starting at once.
    ///
    /// A failed sweep is logged and retried on the next tick.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    let stop = *shutdown.borrow();
                    if stop {
                        break;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::warn!(error = %e, "retention sweep failed");
                    }
                }
            }
        }
    }
}
