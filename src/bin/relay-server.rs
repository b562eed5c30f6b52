//! Relay server binary
//!
//! Usage: relay-server <port> <tcp|udp> [--host HOST] [--log-file PATH]

use anyhow::{Context, Result};
use clap::Parser;
use msgrelay::logging;
use msgrelay::relay::{MessageQueue, ServerCli, ServerInstance};
use std::sync::Arc;

async fn run(cli: ServerCli) -> Result<()> {
    let config = cli.config();
    tracing::info!("Server socket type: {}", config.transport);
    tracing::info!("Server hostname: {}", config.host);
    tracing::info!("Server port: {}", config.port);

    let queue = Arc::new(MessageQueue::new());
    let server = ServerInstance::start(config, queue)
        .await
        .context("Failed to start server")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for interrupt")?;

    tracing::info!("Shutting down server");
    server.shutdown().await;

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = ServerCli::parse();

    if let Err(e) = logging::init(&cli.log_file) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
