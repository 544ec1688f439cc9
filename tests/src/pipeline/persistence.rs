use std::path::PathBuf;
use std::sync::Arc;

use ipsieve_common::store::KeyValueStore;
use ipsieve_core::access::OpenGate;
use ipsieve_core::storage::FileStore;
use serde_json::json;

use crate::support::{FakeFetcher, ScriptedProber, config_for, harness_with, ip};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ipsieve-it-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// The documents on disk keep the field names other consumers read.
#[tokio::test]
async fn persisted_documents_have_stable_shapes() {
    let dir = scratch_dir("shapes");
    let list = "https://lists.example/one.txt";
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&dir));
    let h = harness_with(
        config_for(&[list]),
        FakeFetcher::new().serving(list, "192.0.2.10 192.0.2.11"),
        ScriptedProber::new(&[(ip("192.0.2.11"), 42)]),
        Arc::clone(&store),
        Arc::new(OpenGate),
    );

    h.pipeline.trigger_aggregation_and_probe().await.unwrap();
    h.pipeline
        .submit_client_ranked_set(None, &json!([{"ip": "192.0.2.10", "latency": 8, "colo": "CDG"}]))
        .await
        .unwrap();

    let pool = store.get("ip_pool").await.unwrap().unwrap();
    assert_eq!(pool["ips"], json!(["192.0.2.10", "192.0.2.11"]));
    assert_eq!(pool["count"], json!(2));
    assert!(pool["lastUpdated"].is_string());
    assert_eq!(pool["sources"][0]["status"], json!("success"));

    let fast = store.get("fast_ips").await.unwrap().unwrap();
    assert_eq!(fast["source"], json!("backend_auto"));
    assert_eq!(fast["fastIPs"], json!([{"ip": "192.0.2.11", "latency": 42, "colo": "FRA"}]));
    assert!(fast["lastTested"].is_string());

    let client = store.get("client_fast_ips").await.unwrap().unwrap();
    assert_eq!(client["source"], json!("browser_upload"));
    assert_eq!(client["count"], json!(1));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn a_second_process_sees_the_last_write() {
    let dir = scratch_dir("reopen");
    let list = "https://lists.example/one.txt";

    let first = harness_with(
        config_for(&[list]),
        FakeFetcher::new().serving(list, "203.0.113.0/31"),
        ScriptedProber::default(),
        Arc::new(FileStore::new(&dir)),
        Arc::new(OpenGate),
    );
    first.pipeline.refresh_pool().await.unwrap();

    let second = harness_with(
        config_for(&[list]),
        FakeFetcher::new().serving(list, "203.0.113.9"),
        ScriptedProber::default(),
        Arc::new(FileStore::new(&dir)),
        Arc::new(OpenGate),
    );
    second.pipeline.refresh_pool().await.unwrap();

    let seen = first.pipeline.pool_snapshot().await.unwrap().unwrap();
    assert_eq!(seen.ips, vec![ip("203.0.113.9")]);

    let _ = std::fs::remove_dir_all(&dir);
}
