//! Error model for the authorization boundary.

use thiserror::Error;

/// Failure to resolve an endpoint's visibility metadata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The endpoint carries no documentation text to inspect.
    #[error("no documentation metadata available")]
    MissingDocs,

    /// The endpoint was never registered with the host's registry.
    #[error("endpoint '{name}' is not registered")]
    Unregistered { name: String },
}

/// Rejection raised by the gate for the current request.
///
/// Every variant is terminal for the request: the gate does not retry, log,
/// or recover. The host translates the variant into a client-visible response
/// using [`GateError::http_status`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("parameter \"token\" is required")]
    MissingToken,

    #[error("parameter \"token\" must be a string, but type \"{found}\" given")]
    TokenType { found: &'static str },

    /// Visibility metadata could not be read. A wiring bug on the server
    /// side, not a client error.
    #[error("endpoint \"{endpoint}\" can not be inspected: {source}")]
    Metadata {
        endpoint: String,
        source: MetadataError,
    },

    #[error("token is invalid or expired, please contact your administrator")]
    InvalidToken,
}

impl GateError {
    /// HTTP status hint for hosts: metadata failures are server-side (500),
    /// everything else is a client error (400).
    pub fn http_status(&self) -> u16 {
        match self {
            GateError::Metadata { .. } => 500,
            _ => 400,
        }
    }
}

/// Wiring-time misconfiguration, raised before any request is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateConfigError {
    #[error("define a verification strategy or a secret token in your configuration")]
    MissingStrategy,
}
