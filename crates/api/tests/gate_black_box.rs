//! Black-box tests driving the real router over HTTP.

use std::sync::Arc;

use axum::{Json, Router, middleware, routing::get};
use reqwest::StatusCode;

use tokengate_api::app::build_app;
use tokengate_api::middleware::{GateState, gate_middleware};
use tokengate_auth::{EndpointRegistry, SharedSecretStrategy, TokenGate};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn with_secret(secret: &str) -> Self {
        Self::spawn(build_app(Arc::new(TokenGate::with_secret(secret)))).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn get_json(
    client: &reqwest::Client,
    url: String,
) -> (StatusCode, serde_json::Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    let body = res.json().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn protected_route_requires_a_token() {
    let srv = TestServer::with_secret("test-secret").await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, format!("{}/reports", srv.base_url)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "token_required");
}

#[tokio::test]
async fn protected_route_allows_the_correct_token() {
    let srv = TestServer::with_secret("test-secret").await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(
        &client,
        format!("{}/reports?token=test-secret", srv.base_url),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reports"][0], "daily");
}

#[tokio::test]
async fn percent_encoded_token_reaches_the_gate_decoded() {
    let srv = TestServer::with_secret("test secret").await;
    let client = reqwest::Client::new();

    let (status, _) = get_json(
        &client,
        format!("{}/reports?token=test%20secret", srv.base_url),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_route_rejects_a_wrong_token() {
    let srv = TestServer::with_secret("test-secret").await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, format!("{}/reports?token=wrong", srv.base_url)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "token_invalid");
}

#[tokio::test]
async fn public_route_allows_any_well_typed_token() {
    let srv = TestServer::with_secret("test-secret").await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, format!("{}/status?token=whatever", srv.base_url)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn public_route_still_requires_token_presence() {
    // Presence validation runs before the public bypass.
    let srv = TestServer::with_secret("test-secret").await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, format!("{}/status", srv.base_url)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "token_required");
}

#[tokio::test]
async fn non_string_token_names_the_type() {
    let srv = TestServer::with_secret("test-secret").await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, format!("{}/reports?token=123", srv.base_url)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "token_type");
    assert!(
        body["message"].as_str().unwrap().contains("number"),
        "message should name the runtime type: {}",
        body["message"]
    );
}

#[tokio::test]
async fn unregistered_route_is_a_server_error() {
    // A router with a route the registry never saw: the gate reports the
    // wiring bug as a 500 once a well-typed token has been supplied.
    let state = GateState::new(
        Arc::new(TokenGate::with_secret("test-secret")),
        EndpointRegistry::new(),
    );
    let app = Router::new()
        .route("/orphan", get(|| async { Json(serde_json::json!({})) }))
        .layer(middleware::from_fn_with_state(state, gate_middleware));

    let srv = TestServer::spawn(app).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, format!("{}/orphan?token=abc", srv.base_url)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "endpoint_not_inspectable");
}

#[tokio::test]
async fn inactive_strategy_waves_everything_through() {
    let gate = TokenGate::with_strategy(Arc::new(SharedSecretStrategy::disabled()));
    let srv = TestServer::spawn(build_app(Arc::new(gate))).await;
    let client = reqwest::Client::new();

    let (status, _) = get_json(&client, format!("{}/reports", srv.base_url)).await;

    assert_eq!(status, StatusCode::OK);
}
