//! # Concurrent Batch Runner
//!
//! Probes a random sample of the pool in fixed-size batches.
//!
//! The pool is shuffled (Fisher-Yates) so numerically adjacent addresses are
//! not favoured, then cut to the sample cap. Each batch is a concurrency gate:
//! every probe in it is spawned at once and the batch only completes when all
//! of them have settled. Batches run strictly one after another with a fixed
//! pause in between, never after the last one. At most `batch_size` probes are
//! ever in flight.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ipsieve_common::config::Config;
use ipsieve_common::models::probe::ProbeOutcome;
use rand::Rng;
use rand::seq::SliceRandom;
use tokio::task::JoinSet;

use crate::probe::Prober;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub sample_cap: usize,
    pub batch_size: usize,
    pub pause: Duration,
}

impl From<&Config> for BatchPlan {
    fn from(cfg: &Config) -> Self {
        Self {
            sample_cap: cfg.sample_cap,
            batch_size: cfg.batch_size(),
            pause: cfg.batch_pause(),
        }
    }
}

/// Waits between batches. Swapped out in tests to observe or skip the pauses.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub batches_done: usize,
    pub batches_total: usize,
    pub probed: usize,
    pub successes: usize,
}

pub type ProgressCallback = Arc<dyn Fn(BatchProgress) + Send + Sync>;

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub sampled: usize,
    pub batch_sizes: Vec<usize>,
    /// Successful outcomes in sample order.
    pub successes: Vec<ProbeOutcome>,
    pub failures: usize,
}

pub struct BatchRunner {
    prober: Arc<dyn Prober>,
    plan: BatchPlan,
    pause: Arc<dyn Pause>,
    on_progress: Option<ProgressCallback>,
}

impl BatchRunner {
    pub fn new(prober: Arc<dyn Prober>, plan: BatchPlan) -> Self {
        Self {
            prober,
            plan,
            pause: Arc::new(TokioPause),
            on_progress: None,
        }
    }

    pub fn with_pause(mut self, pause: Arc<dyn Pause>) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_progress(mut self, on_progress: Option<ProgressCallback>) -> Self {
        self.on_progress = on_progress;
        self
    }

    /// Shuffles `pool`, keeps the first `sample_cap` addresses and probes them.
    pub async fn run(&self, pool: &[Ipv4Addr]) -> BatchReport {
        let sample = sample(pool, self.plan.sample_cap, &mut rand::rng());
        self.run_sample(&sample).await
    }

    /// Probes `sample` as given, in order, without shuffling or capping.
    pub async fn run_sample(&self, sample: &[Ipv4Addr]) -> BatchReport {
        let batch_size = self.plan.batch_size.max(1);
        let batches_total = sample.len().div_ceil(batch_size);
        let mut report = BatchReport {
            sampled: sample.len(),
            ..BatchReport::default()
        };

        for (idx, batch) in sample.chunks(batch_size).enumerate() {
            let outcomes = self.run_batch(batch).await;

            report.batch_sizes.push(batch.len());
            for outcome in outcomes {
                if outcome.is_success() {
                    report.successes.push(outcome);
                } else {
                    report.failures += 1;
                }
            }

            if let Some(cb) = &self.on_progress {
                cb(BatchProgress {
                    batches_done: idx + 1,
                    batches_total,
                    probed: report.successes.len() + report.failures,
                    successes: report.successes.len(),
                });
            }

            if idx + 1 < batches_total {
                self.pause.pause(self.plan.pause).await;
            }
        }

        tracing::info!(
            sampled = report.sampled,
            batches = report.batch_sizes.len(),
            successes = report.successes.len(),
            failures = report.failures,
            "batch run finished"
        );
        report
    }

    /// Runs one batch to completion. Outcomes come back in batch order.
    async fn run_batch(&self, batch: &[Ipv4Addr]) -> Vec<ProbeOutcome> {
        let mut in_flight = JoinSet::new();
        for (slot, &addr) in batch.iter().enumerate() {
            let prober = Arc::clone(&self.prober);
            in_flight.spawn(async move { (slot, prober.probe(addr).await) });
        }

        let mut settled: Vec<(usize, ProbeOutcome)> = Vec::with_capacity(batch.len());
        while let Some(joined) = in_flight.join_next().await {
            match joined {
                Ok(pair) => settled.push(pair),
                Err(e) => tracing::warn!(error = %e, "probe task aborted"),
            }
        }

        settled.sort_by_key(|(slot, _)| *slot);
        settled.into_iter().map(|(_, outcome)| outcome).collect()
    }
}

/// Uniform shuffle of the whole pool, truncated to `cap`.
pub fn sample<R: Rng + ?Sized>(pool: &[Ipv4Addr], cap: usize, rng: &mut R) -> Vec<Ipv4Addr> {
    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(cap);
    shuffled
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
