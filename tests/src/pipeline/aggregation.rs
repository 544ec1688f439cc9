use ipsieve_common::error::SourceFetchError;
use ipsieve_common::models::pool::SourceStatus;

use crate::support::{FakeFetcher, ScriptedProber, config_for, harness, ip};

const GOOD: &str = "https://lists.example/good.txt";
const BAD: &str = "https://lists.example/bad.txt";

fn fetcher() -> FakeFetcher {
    FakeFetcher::new()
        .failing(BAD, SourceFetchError::Timeout)
        .serving(GOOD, "# edge list\n203.0.113.5\n203.0.113.1\n203.0.113.5\n198.51.100.0/30 300.1.1.1\n")
}

/// A source that always fails never empties the pool the other one fills.
#[tokio::test]
async fn failing_source_does_not_spoil_the_pool() {
    let h = harness(config_for(&[BAD, GOOD]), fetcher(), ScriptedProber::default());

    for _ in 0..2 {
        let pool = h.pipeline.refresh_pool().await.unwrap();

        let expected: Vec<_> = [
            "198.51.100.0",
            "198.51.100.1",
            "198.51.100.2",
            "198.51.100.3",
            "203.0.113.1",
            "203.0.113.5",
        ]
        .iter()
        .map(|s| ip(s))
        .collect();
        assert_eq!(pool.ips, expected);
        assert_eq!(pool.count, 6);

        assert_eq!(pool.sources.len(), 2);
        assert_eq!(pool.sources[0].name, BAD);
        assert_eq!(pool.sources[0].status, SourceStatus::Error);
        assert_eq!(pool.sources[0].count, 0);
        assert!(pool.sources[0].error.is_some());

        assert_eq!(pool.sources[1].status, SourceStatus::Success);
        // 300.1.1.1 is a token but not an address
        assert_eq!(pool.sources[1].count, 5);
        assert_eq!(pool.sources[1].addresses, 7);
    }

    assert_eq!(h.pipeline.pool_snapshot().await.unwrap().unwrap().count, 6);
}

#[tokio::test]
async fn all_sources_down_is_an_empty_pool() {
    let h = harness(config_for(&[BAD]), fetcher(), ScriptedProber::default());

    let pool = h.pipeline.refresh_pool().await.unwrap();

    assert!(pool.is_empty());
    assert!(!pool.any_source_succeeded());
    assert_eq!(h.pipeline.pool_snapshot().await.unwrap(), Some(pool));
}

#[tokio::test]
async fn large_prefix_contributes_at_most_256() {
    let fetcher = FakeFetcher::new().serving(GOOD, "10.0.0.0/8\n10.0.0.7");
    let h = harness(config_for(&[GOOD]), fetcher, ScriptedProber::default());

    let pool = h.pipeline.refresh_pool().await.unwrap();

    assert_eq!(pool.count, 256);
    assert_eq!(pool.ips.first(), Some(&ip("10.0.0.0")));
    assert_eq!(pool.ips.last(), Some(&ip("10.0.0.255")));
}
