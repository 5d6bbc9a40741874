//! `tokengate-auth` — pure authorization boundary for token-gated endpoints.
//!
//! This crate is intentionally decoupled from HTTP and storage: the gate is a
//! deterministic decision function over a resolved parameter map and an
//! endpoint descriptor, and the host adapter translates its errors into
//! client-visible responses.

pub mod endpoint;
pub mod error;
pub mod gate;
pub mod strategy;

pub use endpoint::{
    DocAnnotated, EndpointDescriptor, EndpointRegistry, StaticVisibility, Unregistered, Visibility,
};
pub use error::{GateConfigError, GateError, MetadataError};
pub use gate::{HookResponse, Params, RequestHook, TokenGate};
pub use strategy::{SharedSecretStrategy, VerificationStrategy};
