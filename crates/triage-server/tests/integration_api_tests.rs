//! Integration tests for REST API endpoints
//!
//! These tests build a real router around a scripted mock model and
//! exercise the endpoints end-to-end, including the three acceptance
//! scenarios from the fixture set.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use triage_agent::{
    AgentSettings, AnalysisError, EscalationConfig, EscalationNotifier, FraudAnalysisService,
};
use triage_llm::{ChatRequest, ChatResponse, LlmClient, LlmError, MockProvider};
use triage_server::api::create_router;

/// Build a router around a scripted mock model, keeping handles to the
/// provider and notifier for call-count assertions.
fn test_app(provider: Arc<MockProvider>) -> (Router, Arc<MockProvider>, Arc<EscalationNotifier>) {
    let notifier = Arc::new(EscalationNotifier::mock(EscalationConfig::default()));
    let service = FraudAnalysisService::new(
        provider.clone(),
        notifier.clone(),
        AgentSettings {
            model: "mock-model".to_string(),
            ..AgentSettings::default()
        },
    );
    (create_router(Arc::new(service)), provider, notifier)
}

fn alert_body(alert_id: &str) -> Value {
    json!({
        "alert_id": alert_id,
        "ingest_ts": "2025-01-15T10:30:00.000Z",
        "transaction": {
            "tx_id": "tx-1",
            "amount": 49.99,
            "currency": "USD",
            "timestamp": "2025-01-15T10:29:55.000Z",
            "payment_method": "credit_card",
            "card_last4": "4242"
        },
        "merchant": {
            "merchant_id": "m-1",
            "name": "Acme Books",
            "merchant_risk": "low",
            "country": "US"
        },
        "customer": {
            "customer_id": "c-1",
            "account_age_days": 180,
            "kyc_status": "verified",
            "chargeback_rate": 0.0
        },
        "signals": {
            "ip_country": "US",
            "device_fingerprint": "fp-1",
            "velocity": { "tx_last_1h": 1, "tx_last_24h": 2, "amount_last_24h": 75.48 },
            "fraud_score_third_party": 0.15
        },
        "rule_engine_flags": [],
        "supporting_context": {
            "recent_events": [],
            "prior_disputes": 0,
            "notes": ""
        }
    })
}

fn post_analyze(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = test_app(Arc::new(MockProvider::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_missing_alert_id_is_400_and_model_untouched() {
    let (app, provider, _) = test_app(Arc::new(MockProvider::new()));

    let mut body = alert_body("alert-x");
    body.as_object_mut().unwrap().remove("alert_id");

    let response = app.oneshot(post_analyze(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("alert_id"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_missing_transaction_is_400() {
    let (app, provider, _) = test_app(Arc::new(MockProvider::new()));

    let mut body = alert_body("alert-x");
    body.as_object_mut().unwrap().remove("transaction");

    let response = app.oneshot(post_analyze(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("transaction"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let (app, provider, _) = test_app(Arc::new(MockProvider::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_allow_scenario_end_to_end() {
    let provider = Arc::new(MockProvider::with_response(
        r#"{"decision": "ALLOW", "confidence": 0.93, "reasoning": "Verified customer, clean history", "risk_score": 0.08, "key_factors": ["verified KYC", "180-day account"], "recommendation": "Process transaction"}"#,
    ));
    let (app, provider, notifier) = test_app(provider);

    let response = app.oneshot(post_analyze(&alert_body("alert-allow"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["alert_id"], "alert-allow");
    assert_eq!(body["decision"]["decision"], "ALLOW");
    assert_eq!(body["decision"]["confidence"], 0.93);
    assert!(body["processing_time_ms"].is_u64());
    assert!(body["timestamp"].is_string());
    assert!(body["agent_response"].is_string());
    assert_eq!(provider.call_count(), 1);
    assert!(notifier.recorded().is_empty());
}

#[tokio::test]
async fn test_block_scenario_end_to_end() {
    let provider = Arc::new(MockProvider::with_response(
        r#"{"decision": "BLOCK", "confidence": 0.91, "reasoning": "Unverified 3-day account, high-risk merchant, high fraud score", "risk_score": 0.88, "key_factors": ["unverified KYC", "velocity 4/1h"], "recommendation": "Block transaction"}"#,
    ));
    let (app, _, notifier) = test_app(provider);

    let mut body = alert_body("alert-block");
    body["transaction"]["amount"] = json!(1299.95);
    body["merchant"]["merchant_risk"] = json!("high");
    body["customer"]["account_age_days"] = json!(3);
    body["customer"]["kyc_status"] = json!("unverified");
    body["signals"]["fraud_score_third_party"] = json!(0.78);
    body["signals"]["velocity"]["tx_last_1h"] = json!(4);

    let response = app.oneshot(post_analyze(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["decision"]["decision"], "BLOCK");
    assert!(notifier.recorded().is_empty());
}

#[tokio::test]
async fn test_escalate_scenario_notifies_exactly_once() {
    let escalation_args = json!({
        "alert_id": "alert-escalate",
        "tx_id": "tx-1",
        "reason": "Mixed signals: verified KYC but borderline fraud score and recent email change",
        "risk_factors": ["fraud score 0.62", "recent email change"],
        "customer_id": "c-1",
        "amount": 899.0,
        "merchant_name": "Horizon Travel"
    });
    let provider = Arc::new(MockProvider::with_script(vec![
        MockProvider::tool_call_response("escalate_to_human", escalation_args),
        ChatResponse::new(
            r#"{"decision": "ESCALATE", "confidence": 0.55, "reasoning": "Mixed signals, needs human review", "risk_score": 0.6, "key_factors": ["borderline fraud score"], "recommendation": "Await analyst determination"}"#.to_string(),
            "mock-model".to_string(),
        ),
    ]));
    let (app, provider, notifier) = test_app(provider);

    let mut body = alert_body("alert-escalate");
    body["transaction"]["amount"] = json!(899.0);
    body["merchant"]["merchant_risk"] = json!("medium");
    body["customer"]["account_age_days"] = json!(45);
    body["signals"]["fraud_score_third_party"] = json!(0.62);
    body["supporting_context"]["recent_events"] = json!(["email_change"]);

    let response = app.oneshot(post_analyze(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["decision"]["decision"], "ESCALATE");
    assert_eq!(provider.call_count(), 2);

    let recorded = notifier.recorded();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].subject.contains("alert-escalate"));
    assert!(recorded[0].body.contains("Horizon Travel"));
}

#[tokio::test]
async fn test_prose_reply_still_yields_complete_result() {
    let provider = Arc::new(MockProvider::with_response(
        "The signals here are ambiguous and I cannot commit either way.",
    ));
    let (app, _, _) = test_app(provider);

    let response = app.oneshot(post_analyze(&alert_body("alert-prose"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["decision"]["decision"], "ESCALATE");
    assert_eq!(body["decision"]["confidence"], 0.5);
}

#[tokio::test]
async fn test_model_failure_is_500_with_details() {
    struct FailingClient;

    #[async_trait::async_trait]
    impl LlmClient for FailingClient {
        async fn chat(&self, _request: ChatRequest) -> triage_llm::Result<ChatResponse> {
            Err(LlmError::ApiCallFailed("quota exceeded".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    let notifier = Arc::new(EscalationNotifier::mock(EscalationConfig::default()));
    let service = FraudAnalysisService::new(
        Arc::new(FailingClient),
        notifier,
        AgentSettings::default(),
    );
    let app = create_router(Arc::new(service));

    let response = app.oneshot(post_analyze(&alert_body("alert-500"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Failed to analyze transaction");
    assert!(body["details"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn test_analysis_error_shapes_are_disjoint() {
    // Sanity: the two error classes never share a status code
    let client_err = AnalysisError::InvalidAlert("missing required field: alert_id".to_string());
    let server_err: AnalysisError = LlmError::ApiCallFailed("boom".to_string()).into();

    let client_api: triage_server::error::ApiError = client_err.into();
    let server_api: triage_server::error::ApiError = server_err.into();

    assert!(matches!(
        client_api,
        triage_server::error::ApiError::InvalidRequest(_)
    ));
    assert!(matches!(
        server_api,
        triage_server::error::ApiError::Internal { .. }
    ));
}
