//! Scheduled refresh.
//!
//! Runs [`Pipeline::trigger_aggregation_and_probe`] once immediately and then
//! on every interval tick until the shutdown future resolves. A failed tick is
//! logged and the loop carries on. Ticks missed while a refresh is still
//! running are skipped, never queued.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use crate::pipeline::{Pipeline, RefreshSummary};

pub struct RefreshDriver {
    pipeline: Arc<Pipeline>,
    interval: Duration,
}

impl RefreshDriver {
    pub fn new(pipeline: Arc<Pipeline>, interval: Duration) -> Self {
        Self {
            pipeline,
            interval: interval.max(Duration::from_secs(1)),
        }
    }

    /// Returns the number of ticks that ran.
    pub async fn run<F>(&self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        let mut ticks = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(ticks, "refresh driver stopped");
                    return ticks;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                    ticks += 1;
                }
            }
        }
    }

    pub async fn tick(&self) -> Option<RefreshSummary> {
        match self.pipeline.trigger_aggregation_and_probe().await {
            Ok(summary) => {
                tracing::info!(
                    pool_size = summary.pool_size,
                    probed = summary.probed,
                    ranked = ?summary.ranked,
                    skipped = summary.skipped,
                    "scheduled refresh done"
                );
                Some(summary)
            }
            Err(e) => {
                tracing::error!(error = %e, "scheduled refresh failed");
                None
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
