//! # Pipeline
//!
//! The exposed operations, wired to their collaborators. A transport layer
//! (the CLI, or anything else) holds one [`Pipeline`] and maps requests onto
//! its methods.
//!
//! Refreshes inside one process are serialized by an async mutex. Separate
//! processes sharing a store are not coordinated: the last writer wins.

use std::net::Ipv4Addr;
use std::sync::Arc;

use ipsieve_common::config::Config;
use ipsieve_common::error::PipelineError;
use ipsieve_common::models::pool::{PoolSnapshot, SourceResult};
use ipsieve_common::models::probe::ProbeOutcome;
use ipsieve_common::models::ranked::RankedSet;
use ipsieve_common::store::{self, KeyValueStore, keys};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::access::{AccessGate, Credential};
use crate::batch::{BatchPlan, BatchRunner, Pause, ProgressCallback, TokioPause};
use crate::probe::Prober;
use crate::sources::SourceFetcher;
use crate::{pool, select, submission};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub pool_size: usize,
    pub sources: Vec<SourceResult>,
    /// Addresses sampled and probed this run.
    pub probed: usize,
    /// Size of the persisted backend ranked set, if one was written.
    pub ranked: Option<usize>,
    /// Probing was skipped because no source succeeded (strict mode).
    pub skipped: bool,
}

pub struct Pipeline {
    config: Arc<Config>,
    store: Arc<dyn KeyValueStore>,
    fetcher: Arc<dyn SourceFetcher>,
    prober: Arc<dyn Prober>,
    gate: Arc<dyn AccessGate>,
    pause: Arc<dyn Pause>,
    on_progress: Option<ProgressCallback>,
    refresh_lock: Mutex<()>,
}

impl Pipeline {
    pub fn new(
        config: Arc<Config>,
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn SourceFetcher>,
        prober: Arc<dyn Prober>,
        gate: Arc<dyn AccessGate>,
    ) -> Self {
        Self {
            config,
            store,
            fetcher,
            prober,
            gate,
            pause: Arc::new(TokioPause),
            on_progress: None,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_pause(mut self, pause: Arc<dyn Pause>) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn authorize(&self, credential: Option<&Credential>) -> Result<(), PipelineError> {
        if self.gate.authorize(credential).await {
            Ok(())
        } else {
            Err(PipelineError::Unauthorized)
        }
    }

    /// Aggregates the sources and replaces the persisted pool. No probing.
    pub async fn refresh_pool(&self) -> Result<PoolSnapshot, PipelineError> {
        let _guard = self.refresh_lock.lock().await;
        self.assemble_and_persist().await
    }

    /// Full refresh: aggregate, persist the pool, then probe a sample of it
    /// and persist the backend ranked set.
    ///
    /// Probing runs even when every source failed, unless `strict` is set.
    /// An empty pool leaves the previous ranked set in place.
    pub async fn trigger_aggregation_and_probe(&self) -> Result<RefreshSummary, PipelineError> {
        let _guard = self.refresh_lock.lock().await;
        let snapshot = self.assemble_and_persist().await?;

        let mut summary = RefreshSummary {
            pool_size: snapshot.count,
            sources: snapshot.sources.clone(),
            probed: 0,
            ranked: None,
            skipped: false,
        };

        if self.config.strict && !snapshot.any_source_succeeded() {
            tracing::warn!("no source succeeded, skipping probe run");
            summary.skipped = true;
            return Ok(summary);
        }

        if snapshot.is_empty() {
            tracing::warn!("pool is empty, keeping previous ranked set");
            return Ok(summary);
        }

        let runner = BatchRunner::new(Arc::clone(&self.prober), BatchPlan::from(self.config.as_ref()))
            .with_pause(Arc::clone(&self.pause))
            .with_progress(self.on_progress.clone());
        let report = runner.run(&snapshot.ips).await;

        let ranked = select::select(&report.successes, self.config.fast_ip_count());
        store::save(self.store.as_ref(), keys::BACKEND_RANKED_SET, &ranked, None).await?;
        tracing::info!(probed = report.sampled, ranked = ranked.count, "backend ranked set saved");

        summary.probed = report.sampled;
        summary.ranked = Some(ranked.count);
        Ok(summary)
    }

    /// Persists a client-computed ranked set. The credential is checked before
    /// the payload is even looked at.
    pub async fn submit_client_ranked_set(
        &self,
        credential: Option<&Credential>,
        payload: &Value,
    ) -> Result<RankedSet, PipelineError> {
        self.authorize(credential).await?;
        let ranked = submission::accept_submission(payload)?;
        store::save(self.store.as_ref(), keys::CLIENT_RANKED_SET, &ranked, None).await?;
        tracing::info!(count = ranked.count, "client ranked set saved");
        Ok(ranked)
    }

    pub async fn pool_snapshot(&self) -> Result<Option<PoolSnapshot>, PipelineError> {
        Ok(store::load(self.store.as_ref(), keys::POOL_SNAPSHOT).await?)
    }

    pub async fn backend_ranked_set(&self) -> Result<Option<RankedSet>, PipelineError> {
        Ok(store::load(self.store.as_ref(), keys::BACKEND_RANKED_SET).await?)
    }

    pub async fn client_ranked_set(&self) -> Result<Option<RankedSet>, PipelineError> {
        Ok(store::load(self.store.as_ref(), keys::CLIENT_RANKED_SET).await?)
    }

    pub async fn probe_one_address(&self, addr: Ipv4Addr) -> ProbeOutcome {
        self.prober.probe(addr).await
    }

    async fn assemble_and_persist(&self) -> Result<PoolSnapshot, PipelineError> {
        let snapshot = pool::assemble(self.fetcher.as_ref(), &self.config.source_urls).await;
        store::save(self.store.as_ref(), keys::POOL_SNAPSHOT, &snapshot, None).await?;
        Ok(snapshot)
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
