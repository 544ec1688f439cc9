use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use ipsieve_common::config::Config;
use ipsieve_common::error::SourceFetchError;
use ipsieve_common::models::ranked::Provenance;
use ipsieve_core::driver::RefreshDriver;

use crate::support::{FakeFetcher, ScriptedProber, config_for, harness, ip};

const LIST: &str = "https://lists.example/edges.txt";

fn seven() -> FakeFetcher {
    FakeFetcher::new().serving(
        LIST,
        "192.0.2.1 192.0.2.2 192.0.2.3 192.0.2.4 192.0.2.5 192.0.2.6 192.0.2.7",
    )
}

#[tokio::test]
async fn keeps_the_two_fastest_of_seven() {
    let prober = ScriptedProber::new(&[(ip("192.0.2.3"), 50), (ip("192.0.2.5"), 300), (ip("192.0.2.6"), 10)]);
    let config = Config {
        fast_ip_count: 2,
        ..config_for(&[LIST])
    };
    let h = harness(config, seven(), prober);

    let summary = h.pipeline.trigger_aggregation_and_probe().await.unwrap();
    assert_eq!(summary.pool_size, 7);
    assert_eq!(summary.probed, 7);
    assert_eq!(summary.ranked, Some(2));

    let ranked = h.pipeline.backend_ranked_set().await.unwrap().unwrap();
    let picked: Vec<_> = ranked.entries.iter().map(|e| (e.addr, e.latency_ms)).collect();
    assert_eq!(picked, vec![(ip("192.0.2.6"), 10), (ip("192.0.2.3"), 50)]);
    assert_eq!(ranked.provenance, Provenance::BackendAuto);
    assert_eq!(h.prober.calls.load(Ordering::SeqCst), 7);
}

#[tokio::test(start_paused = true)]
async fn batches_bound_concurrency() {
    let fetcher = FakeFetcher::new().serving(LIST, "192.0.2.1 192.0.2.2 192.0.2.3 192.0.2.4 192.0.2.5");
    let prober = ScriptedProber::new(&[(ip("192.0.2.1"), 20)]).with_delay(Duration::from_millis(40));
    let config = Config {
        batch_size: 2,
        ..config_for(&[LIST])
    };
    let h = harness(config, fetcher, prober);

    h.pipeline.trigger_aggregation_and_probe().await.unwrap();

    assert_eq!(h.prober.calls.load(Ordering::SeqCst), 5);
    assert_eq!(h.prober.peak.load(Ordering::SeqCst), 2);
    assert_eq!(h.pauses.count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn sample_cap_limits_probes() {
    let fetcher = FakeFetcher::new().serving(LIST, "198.51.100.0/24");
    let config = Config {
        sample_cap: 30,
        ..config_for(&[LIST])
    };
    let h = harness(config, fetcher, ScriptedProber::default());

    let summary = h.pipeline.trigger_aggregation_and_probe().await.unwrap();

    assert_eq!(summary.pool_size, 256);
    assert_eq!(summary.probed, 30);
    assert_eq!(h.prober.calls.load(Ordering::SeqCst), 30);
    // every probe failed, so the ranked set is written but empty
    assert_eq!(summary.ranked, Some(0));
}

#[tokio::test]
async fn failed_aggregation_still_probes_by_default() {
    let fetcher = FakeFetcher::new().failing(LIST, SourceFetchError::Status(503));
    let h = harness(config_for(&[LIST]), fetcher, ScriptedProber::default());

    let summary = h.pipeline.trigger_aggregation_and_probe().await.unwrap();

    assert!(!summary.skipped);
    assert_eq!(summary.pool_size, 0);
    assert_eq!(summary.ranked, None);
}

#[tokio::test]
async fn strict_driver_skips_probing_when_sources_fail() {
    let fetcher = FakeFetcher::new().failing(LIST, SourceFetchError::Timeout);
    let config = Config {
        strict: true,
        ..config_for(&[LIST])
    };
    let h = harness(config, fetcher, ScriptedProber::default());
    let driver = RefreshDriver::new(Arc::new(h.pipeline), Duration::from_secs(60));

    let summary = driver.tick().await.unwrap();

    assert!(summary.skipped);
    assert_eq!(summary.probed, 0);
    assert_eq!(h.prober.calls.load(Ordering::SeqCst), 0);
}
