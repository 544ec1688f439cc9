//! Fake collaborators shared by the integration tests.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ipsieve_common::config::Config;
use ipsieve_common::error::{ProbeError, SourceFetchError, StoreError};
use ipsieve_common::models::probe::ProbeOutcome;
use ipsieve_common::store::KeyValueStore;
use ipsieve_core::access::{AccessGate, Credential, OpenGate};
use ipsieve_core::batch::Pause;
use ipsieve_core::pipeline::Pipeline;
use ipsieve_core::probe::Prober;
use ipsieve_core::sources::SourceFetcher;
use ipsieve_core::storage::MemoryStore;
use serde_json::Value;

#[derive(Default)]
pub struct FakeFetcher {
    docs: HashMap<String, Result<String, SourceFetchError>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serving(mut self, url: &str, body: &str) -> Self {
        self.docs.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn failing(mut self, url: &str, err: SourceFetchError) -> Self {
        self.docs.insert(url.to_string(), Err(err));
        self
    }
}

#[async_trait]
impl SourceFetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, SourceFetchError> {
        self.docs
            .get(url)
            .cloned()
            .unwrap_or(Err(SourceFetchError::Transport(format!("no route to {url}"))))
    }
}

/// Answers from a fixed latency table; anything not in it times out.
/// Every probe takes `delay` so overlapping probes can be observed.
#[derive(Default)]
pub struct ScriptedProber {
    latencies: HashMap<Ipv4Addr, u64>,
    delay: Duration,
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: AtomicUsize,
}

impl ScriptedProber {
    pub fn new(latencies: &[(Ipv4Addr, u64)]) -> Self {
        Self {
            latencies: latencies.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.latencies.get(&addr) {
            Some(&ms) => ProbeOutcome::success(addr, ms, Some("FRA".to_string())),
            None => ProbeOutcome::failure(addr, ProbeError::Timeout),
        }
    }
}

#[derive(Default)]
pub struct CountingPause {
    pub count: AtomicUsize,
}

#[async_trait]
impl Pause for CountingPause {
    async fn pause(&self, _duration: Duration) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// A backend that is always down.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Backend("down".to_string()))
    }

    async fn put(&self, _key: &str, _value: Value, _ttl: Option<Duration>) -> Result<(), StoreError> {
        Err(StoreError::Backend("down".to_string()))
    }
}

pub struct DenyGate;

#[async_trait]
impl AccessGate for DenyGate {
    async fn authorize(&self, _credential: Option<&Credential>) -> bool {
        false
    }
}

pub struct Harness {
    pub pipeline: Pipeline,
    pub store: Arc<dyn KeyValueStore>,
    pub prober: Arc<ScriptedProber>,
    pub pauses: Arc<CountingPause>,
}

pub fn harness(config: Config, fetcher: FakeFetcher, prober: ScriptedProber) -> Harness {
    harness_with(config, fetcher, prober, Arc::new(MemoryStore::new()), Arc::new(OpenGate))
}

pub fn harness_with(
    config: Config,
    fetcher: FakeFetcher,
    prober: ScriptedProber,
    store: Arc<dyn KeyValueStore>,
    gate: Arc<dyn AccessGate>,
) -> Harness {
    let prober = Arc::new(prober);
    let pauses = Arc::new(CountingPause::default());
    let pipeline = Pipeline::new(
        Arc::new(config),
        Arc::clone(&store),
        Arc::new(fetcher),
        prober.clone(),
        gate,
    )
    .with_pause(pauses.clone());

    Harness {
        pipeline,
        store,
        prober,
        pauses,
    }
}

pub fn config_for(urls: &[&str]) -> Config {
    Config {
        source_urls: urls.iter().map(|u| u.to_string()).collect(),
        ..Config::default()
    }
}

pub fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}
