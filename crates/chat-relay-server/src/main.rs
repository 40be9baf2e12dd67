//! Chat relay server.
//!
//! Run with: cargo run -p chat-relay-server -- --listen 127.0.0.1:8080
//!
//! Then connect a WebSocket client to ws://127.0.0.1:8080/chat/{userId}.

use anyhow::Result;
use chat_relay_server::{Args, ServerConfig, start, telemetry::init_tracing};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from(Args::parse());
    init_tracing(&config.log_filter)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting chat relay");

    let handle = start(config).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");

    handle.shutdown();
    handle.stopped().await;
    Ok(())
}
