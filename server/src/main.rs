//! megaverse-server binary: wires configuration, the remote client, and the
//! reconciler together behind a small HTTP surface.
//!
//! ```text
//! main() -> Config::from_env() -> RemoteClient -> Reconciler -> axum::serve
//! ```

mod config;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use megaverse_client::{ClientConfig, RemoteClient};
use megaverse_core::{Reconciler, ReconcilerConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration, matching how this service is
    // deployed locally.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = config::Config::from_env().context("invalid configuration")?;
    tracing::info!(
        remote_api = %config.remote_api,
        strict_verification = config.strict_verification,
        "configuration loaded"
    );

    let client_config =
        ClientConfig::new(config.remote_api.clone()).with_timeout(config.request_timeout);
    let client = RemoteClient::new(&client_config).context("failed to build remote client")?;
    let reconciler = Reconciler::new(
        client,
        ReconcilerConfig::new(config.candidate_id.clone())
            .with_strict_verification(config.strict_verification),
    );

    let app = routes::router(Arc::new(reconciler));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "megaverse server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
