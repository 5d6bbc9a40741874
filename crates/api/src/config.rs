//! Environment-driven configuration. Missing or invalid values fail the
//! process at startup, before any request is served.

use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = match std::env::var("PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 8080,
        };
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let secret = std::env::var("TOKENGATE_SECRET")
            .map_err(|_| ConfigError::Missing("TOKENGATE_SECRET"))?;
        if secret.is_empty() {
            return Err(ConfigError::Invalid("TOKENGATE_SECRET"));
        }

        Ok(Self { addr, secret })
    }
}
