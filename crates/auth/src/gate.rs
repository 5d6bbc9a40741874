//! The authorization gate: allow/deny decision before a handler runs.
//!
//! # Invariants
//! - The gate always holds a verification strategy after construction.
//! - `before_process` is a pure decision function: no IO, no logging, no
//!   side effects beyond the returned value.
//! - Check order is normative and security-relevant: inactive-strategy
//!   bypass, then token presence/type validation, then the public-endpoint
//!   bypass, then verification. A public endpoint therefore still rejects a
//!   request whose `token` is missing or not a string.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use serde_json::Value;

use crate::endpoint::{EndpointDescriptor, Visibility};
use crate::error::{GateConfigError, GateError};
use crate::strategy::{SharedSecretStrategy, VerificationStrategy};

/// Resolved request parameters as seen by the gate.
pub type Params = HashMap<String, Value>;

/// Short-circuit response a hook may produce instead of letting the request
/// proceed. The gate itself never produces one (allow is `Ok(None)`); the
/// contract carries it for hooks that do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookResponse {
    pub status: u16,
    pub body: Value,
}

impl HookResponse {
    /// Summary of an already-produced response, for `after_process`.
    pub fn status_only(status: u16) -> Self {
        Self {
            status,
            body: Value::Null,
        }
    }
}

/// Middleware capability contract the host drives around each request.
///
/// The host must call [`before_process`] before invoking the endpoint
/// handler and [`after_process`] after it, and must translate any error into
/// a request failure using [`GateError::http_status`].
///
/// [`before_process`]: RequestHook::before_process
/// [`after_process`]: RequestHook::after_process
pub trait RequestHook: Send + Sync {
    /// Runs before the endpoint handler. `Ok(None)` means "no objection".
    fn before_process(
        &self,
        endpoint: &dyn EndpointDescriptor,
        params: &Params,
        action: &str,
        method: &str,
    ) -> Result<Option<HookResponse>, GateError>;

    /// Runs after the endpoint handler, receiving a summary of the produced
    /// response (if any).
    fn after_process(
        &self,
        endpoint: &dyn EndpointDescriptor,
        params: &Params,
        response: Option<&HookResponse>,
    ) -> Result<Option<HookResponse>, GateError>;
}

/// The authorization gate.
///
/// Holds exactly one verification strategy, constructed once at wiring time.
/// The strategy may be swapped at runtime; replacement goes through a
/// synchronized cell so concurrent hosts need no external locking.
pub struct TokenGate {
    strategy: RwLock<Arc<dyn VerificationStrategy>>,
}

impl TokenGate {
    /// Build a gate from an explicit strategy, or from a raw secret via the
    /// reference [`SharedSecretStrategy`]. Supplying neither is a wiring bug
    /// and fails fast, before any request is processed.
    pub fn new(
        strategy: Option<Arc<dyn VerificationStrategy>>,
        secret: Option<String>,
    ) -> Result<Self, GateConfigError> {
        let strategy: Arc<dyn VerificationStrategy> = match (strategy, secret) {
            (Some(strategy), _) => strategy,
            (None, Some(secret)) => Arc::new(SharedSecretStrategy::new(secret)),
            (None, None) => return Err(GateConfigError::MissingStrategy),
        };

        Ok(Self {
            strategy: RwLock::new(strategy),
        })
    }

    pub fn with_strategy(strategy: Arc<dyn VerificationStrategy>) -> Self {
        Self {
            strategy: RwLock::new(strategy),
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::with_strategy(Arc::new(SharedSecretStrategy::new(secret)))
    }

    /// Replace the active strategy. Takes effect for requests decided after
    /// the swap.
    pub fn set_strategy(&self, strategy: Arc<dyn VerificationStrategy>) {
        *self.strategy.write().unwrap() = strategy;
    }

    fn strategy(&self) -> Arc<dyn VerificationStrategy> {
        Arc::clone(&self.strategy.read().unwrap())
    }
}

impl RequestHook for TokenGate {
    fn before_process(
        &self,
        endpoint: &dyn EndpointDescriptor,
        params: &Params,
        _action: &str,
        _method: &str,
    ) -> Result<Option<HookResponse>, GateError> {
        let strategy = self.strategy();
        if !strategy.is_active() {
            return Ok(None);
        }

        // An explicit null collapses into the missing case.
        let token = match params.get("token") {
            None | Some(Value::Null) => return Err(GateError::MissingToken),
            Some(Value::String(token)) => token,
            Some(other) => {
                return Err(GateError::TokenType {
                    found: json_type_name(other),
                });
            }
        };

        // Public endpoints bypass verification, but only once the token has
        // passed the presence and type checks above.
        match endpoint.visibility() {
            Ok(Visibility::Public) => return Ok(None),
            Ok(Visibility::Protected) => {}
            Err(source) => {
                return Err(GateError::Metadata {
                    endpoint: endpoint.name().to_string(),
                    source,
                });
            }
        }

        if strategy.verify(token) {
            Ok(None)
        } else {
            Err(GateError::InvalidToken)
        }
    }

    fn after_process(
        &self,
        _endpoint: &dyn EndpointDescriptor,
        _params: &Params,
        _response: Option<&HookResponse>,
    ) -> Result<Option<HookResponse>, GateError> {
        Ok(None)
    }
}

/// Runtime type name of a JSON value, for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
