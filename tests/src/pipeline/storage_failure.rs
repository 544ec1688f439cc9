use std::sync::Arc;
use std::sync::atomic::Ordering;

use ipsieve_common::error::{PipelineError, StoreError};
use ipsieve_core::access::OpenGate;
use serde_json::json;

use crate::support::{
    BrokenStore, FakeFetcher, Harness, ScriptedProber, config_for, harness_with, ip,
};

const LIST: &str = "https://lists.example/edges.txt";

fn broken() -> Harness {
    harness_with(
        config_for(&[LIST]),
        FakeFetcher::new().serving(LIST, "192.0.2.1 192.0.2.2"),
        ScriptedProber::new(&[(ip("192.0.2.1"), 12)]),
        Arc::new(BrokenStore),
        Arc::new(OpenGate),
    )
}

/// The pool cannot be saved, so the run stops before any latency is measured.
#[tokio::test]
async fn refresh_aborts_when_the_pool_cannot_be_saved() {
    let h = broken();

    let err = h.pipeline.trigger_aggregation_and_probe().await.unwrap_err();

    assert!(matches!(err, PipelineError::Storage(StoreError::Backend(_))));
    assert_eq!(h.prober.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn pool_refresh_reports_storage_failure() {
    let h = broken();
    let err = h.pipeline.refresh_pool().await.unwrap_err();
    assert!(matches!(err, PipelineError::Storage(_)));
}

#[tokio::test]
async fn submission_reports_storage_failure() {
    let h = broken();

    let err = h
        .pipeline
        .submit_client_ranked_set(None, &json!([{"address": "192.0.2.8", "latencyMs": 33}]))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Storage(_)));
}

#[tokio::test]
async fn views_report_storage_failure() {
    let h = broken();
    assert!(matches!(h.pipeline.pool_snapshot().await, Err(PipelineError::Storage(_))));
    assert!(matches!(h.pipeline.backend_ranked_set().await, Err(PipelineError::Storage(_))));
    assert!(matches!(h.pipeline.client_ranked_set().await, Err(PipelineError::Storage(_))));
}
