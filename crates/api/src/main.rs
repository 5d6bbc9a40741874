use std::sync::Arc;

use anyhow::Context;

use tokengate_api::{app, config::Config};
use tokengate_auth::TokenGate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tokengate_observability::init();

    let config = Config::from_env().context("configuration")?;
    let gate = Arc::new(TokenGate::with_secret(config.secret.clone()));

    let app = app::build_app(gate);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
