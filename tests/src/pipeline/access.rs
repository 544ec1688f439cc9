use std::sync::Arc;

use ipsieve_common::config::Config;
use ipsieve_common::error::PipelineError;
use ipsieve_common::store::KeyValueStore;
use ipsieve_core::access::{AccessGate, AdminGate, Credential, TokenExpiry};
use ipsieve_core::storage::MemoryStore;
use serde_json::json;

use crate::support::{DenyGate, FakeFetcher, ScriptedProber, config_for, harness_with};

fn payload() -> serde_json::Value {
    json!([{"address": "192.0.2.8", "latencyMs": 33, "locationCode": "SIN"}])
}

#[tokio::test]
async fn rejected_before_anything_is_stored() {
    let h = harness_with(
        config_for(&[]),
        FakeFetcher::new(),
        ScriptedProber::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(DenyGate),
    );

    let err = h
        .pipeline
        .submit_client_ranked_set(Some(&Credential::Token("whatever".into())), &payload())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Unauthorized));
    assert!(h.store.get("client_fast_ips").await.unwrap().is_none());
}

#[tokio::test]
async fn rejection_wins_over_a_malformed_payload() {
    let h = harness_with(
        config_for(&[]),
        FakeFetcher::new(),
        ScriptedProber::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(DenyGate),
    );

    let err = h
        .pipeline
        .submit_client_ranked_set(None, &json!("nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Unauthorized));
}

#[tokio::test]
async fn admin_session_and_token_unlock_submission() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let gate = Arc::new(AdminGate::new(Some("s3cret".into()), Arc::clone(&store), &Config::default()));
    let h = harness_with(
        config_for(&[]),
        FakeFetcher::new(),
        ScriptedProber::default(),
        Arc::clone(&store),
        gate.clone(),
    );

    assert!(h.pipeline.submit_client_ranked_set(None, &payload()).await.is_err());

    let grant = gate.login("s3cret").await.unwrap();
    let session = Credential::Session(grant.session_id);
    h.pipeline.submit_client_ranked_set(Some(&session), &payload()).await.unwrap();

    let token = Credential::Token(grant.token.token.clone());
    h.pipeline.submit_client_ranked_set(Some(&token), &payload()).await.unwrap();

    gate.set_token("rotated", TokenExpiry::Days(7)).await.unwrap();
    assert!(!gate.authorize(Some(&token)).await);
    assert!(gate.authorize(Some(&Credential::Token("rotated".into()))).await);
}
