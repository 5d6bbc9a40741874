//! Mapping of gate errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use tokengate_auth::{GateError, HookResponse};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

pub fn gate_error_to_response(err: &GateError) -> Response {
    let code = match err {
        GateError::MissingToken => "token_required",
        GateError::TokenType { .. } => "token_type",
        GateError::Metadata { .. } => "endpoint_not_inspectable",
        GateError::InvalidToken => "token_invalid",
    };

    json_error(status_from(err.http_status()), code, err.to_string())
}

pub fn json_error(status: StatusCode, error: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error,
            message: message.into(),
        }),
    )
        .into_response()
}

/// Convert a hook's short-circuit response into an HTTP response.
pub fn hook_response_to_response(hook: HookResponse) -> Response {
    (status_from(hook.status), Json(hook.body)).into_response()
}

fn status_from(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
