//! Router assembly: demo routes, endpoint registry, gate middleware.

use std::sync::Arc;

use axum::{Json, Router, middleware, routing::get};
use serde_json::json;

use tokengate_auth::{DocAnnotated, EndpointRegistry, StaticVisibility, TokenGate};

use crate::middleware::{GateState, gate_middleware};

/// Build the production router around the given gate.
///
/// Every route is registered with a visibility descriptor; the gate treats
/// unregistered routes as server-side wiring failures.
pub fn build_app(gate: Arc<TokenGate>) -> Router {
    let mut registry = EndpointRegistry::new();
    registry.register(DocAnnotated::new(
        "/status",
        "Service status summary.\n@public",
    ));
    registry.register(DocAnnotated::new(
        "/reports",
        "Operational reports. Requires a valid token.",
    ));
    registry.register(StaticVisibility::protected("/reports/daily"));

    let state = GateState::new(gate, registry);

    Router::new()
        .route("/status", get(status))
        .route("/reports", get(reports))
        .route("/reports/daily", get(daily_report))
        .layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn status() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn reports() -> Json<serde_json::Value> {
    Json(json!({ "reports": ["daily", "weekly"] }))
}

async fn daily_report() -> Json<serde_json::Value> {
    Json(json!({ "report": "daily", "rows": 0 }))
}
