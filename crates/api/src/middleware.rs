//! Gate middleware: runs the authorization decision around every request.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use tokengate_auth::{
    EndpointDescriptor, EndpointRegistry, Params, RequestHook, TokenGate, Unregistered,
};

use crate::errors::{gate_error_to_response, hook_response_to_response};

#[derive(Clone)]
pub struct GateState {
    pub gate: Arc<TokenGate>,
    pub registry: Arc<EndpointRegistry>,
}

impl GateState {
    pub fn new(gate: Arc<TokenGate>, registry: EndpointRegistry) -> Self {
        Self {
            gate,
            registry: Arc::new(registry),
        }
    }
}

pub async fn gate_middleware(
    State(state): State<GateState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().as_str().to_string();
    let params = collect_params(req.uri().query());

    // A route that exists in the router but not in the registry surfaces as
    // a metadata failure inside the gate (server-side wiring bug, 500).
    let fallback;
    let endpoint: &dyn EndpointDescriptor = match state.registry.get(&path) {
        Some(endpoint) => endpoint,
        None => {
            fallback = Unregistered::new(path.clone());
            &fallback
        }
    };

    match state.gate.before_process(endpoint, &params, &path, &method) {
        Ok(None) => {}
        Ok(Some(hook)) => return hook_response_to_response(hook),
        Err(err) => {
            tracing::warn!(endpoint = %path, error = %err, "request rejected");
            return gate_error_to_response(&err);
        }
    }

    let response = next.run(req).await;

    let summary = tokengate_auth::HookResponse::status_only(response.status().as_u16());
    match state.gate.after_process(endpoint, &params, Some(&summary)) {
        Ok(None) => response,
        Ok(Some(hook)) => hook_response_to_response(hook),
        Err(err) => {
            tracing::warn!(endpoint = %path, error = %err, "post-processing rejected");
            gate_error_to_response(&err)
        }
    }
}

/// Resolve query-string pairs into the gate's parameter map.
///
/// Keys and values are percent-decoded (`+` counts as a space). Decoded
/// values that parse as non-string JSON keep their JSON type (`token=42`
/// arrives as a number, `token=true` as a bool), so the gate's type check is
/// observable at the HTTP boundary. Everything else stays a string.
fn collect_params(query: Option<&str>) -> Params {
    let mut params = Params::new();
    let Some(query) = query else {
        return params;
    };

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        let raw = percent_decode(raw);
        let value = match serde_json::from_str::<Value>(&raw) {
            Ok(parsed) if !parsed.is_string() => parsed,
            _ => Value::String(raw),
        };
        params.insert(percent_decode(key), value);
    }

    params
}

/// Decode `%XX` escapes and `+` in a query component. Malformed escapes and
/// non-UTF-8 results are passed through verbatim.
fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let escape = bytes.get(i + 1..i + 3).and_then(|pair| {
                    let hi = (pair[0] as char).to_digit(16)?;
                    let lo = (pair[1] as char).to_digit(16)?;
                    Some((hi * 16 + lo) as u8)
                });
                match escape {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(out).unwrap_or_else(|_| raw.to_string())
}
