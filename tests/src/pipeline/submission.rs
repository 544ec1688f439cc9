use ipsieve_common::error::{PipelineError, SubmissionError};
use ipsieve_common::models::ranked::Provenance;
use serde_json::json;

use crate::support::{FakeFetcher, ScriptedProber, config_for, harness, ip};

#[tokio::test]
async fn not_a_list_leaves_client_set_unchanged() {
    let h = harness(config_for(&[]), FakeFetcher::new(), ScriptedProber::default());
    let first = h
        .pipeline
        .submit_client_ranked_set(None, &json!([{"address": "192.0.2.8", "latencyMs": 33, "locationCode": "SIN"}]))
        .await
        .unwrap();

    let err = h
        .pipeline
        .submit_client_ranked_set(None, &json!({"address": "192.0.2.9", "latencyMs": 1}))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::InvalidSubmission(SubmissionError::NotAList)));
    assert_eq!(h.pipeline.client_ranked_set().await.unwrap(), Some(first));
}

#[tokio::test]
async fn bad_entry_is_reported_by_index() {
    let h = harness(config_for(&[]), FakeFetcher::new(), ScriptedProber::default());

    let err = h
        .pipeline
        .submit_client_ranked_set(
            None,
            &json!([
                {"address": "192.0.2.8", "latencyMs": 33},
                {"address": "not-an-ip", "latencyMs": 10}
            ]),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::InvalidSubmission(SubmissionError::BadEntry { index: 1, .. })
    ));
    assert!(h.pipeline.client_ranked_set().await.unwrap().is_none());
}

/// Order, latencies and size come through untouched, even when unsorted
/// and larger than the backend cap.
#[tokio::test]
async fn submission_is_kept_verbatim() {
    let h = harness(config_for(&[]), FakeFetcher::new(), ScriptedProber::default());
    let entries: Vec<_> = (0..30u64)
        .map(|i| json!({"ip": format!("198.51.100.{i}"), "latency": 500 - i, "colo": "LHR"}))
        .collect();

    let stored = h
        .pipeline
        .submit_client_ranked_set(None, &serde_json::Value::Array(entries))
        .await
        .unwrap();

    assert_eq!(stored.count, 30);
    assert_eq!(stored.provenance, Provenance::ClientUpload);
    assert_eq!(stored.entries[0].addr, ip("198.51.100.0"));
    assert_eq!(stored.entries[0].latency_ms, 500);
}

#[tokio::test]
async fn client_and_backend_sets_stay_apart() {
    let list = "https://lists.example/one.txt";
    let fetcher = FakeFetcher::new().serving(list, "192.0.2.77");
    let h = harness(
        config_for(&[list]),
        fetcher,
        ScriptedProber::new(&[(ip("192.0.2.77"), 15)]),
    );

    h.pipeline
        .submit_client_ranked_set(None, &json!([{"address": "203.0.113.3", "latencyMs": 5}]))
        .await
        .unwrap();
    h.pipeline.trigger_aggregation_and_probe().await.unwrap();

    let backend = h.pipeline.backend_ranked_set().await.unwrap().unwrap();
    let client = h.pipeline.client_ranked_set().await.unwrap().unwrap();
    assert_eq!(backend.entries[0].addr, ip("192.0.2.77"));
    assert_eq!(client.entries[0].addr, ip("203.0.113.3"));
    assert_eq!(client.provenance, Provenance::ClientUpload);
}
