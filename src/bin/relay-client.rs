//! Relay client binary
//!
//! Usage: relay-client <host> <port> <tcp|udp> <send|receive> [filename]

use anyhow::Result;
use clap::Parser;
use msgrelay::logging;
use msgrelay::relay::{ClientAction, ClientCli, RelayClient, RelayError};

async fn run(client: RelayClient, action: ClientAction) -> Result<()> {
    match action {
        ClientAction::Send(path) => {
            client.send_file(&path).await?;
        }
        ClientAction::Receive => {
            client.receive().await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = ClientCli::parse();

    if let Err(e) = logging::init(&cli.log_file) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    let action = match cli.action() {
        Ok(action) => action,
        Err(e @ RelayError::MissingFilename) => {
            tracing::warn!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let client = RelayClient::new(cli.config());
    if let Err(e) = run(client, action).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
