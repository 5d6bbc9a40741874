//! `tokengate-api` — axum host for the token authorization gate.

pub mod app;
pub mod config;
pub mod errors;
pub mod middleware;
