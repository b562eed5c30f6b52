// CLI definitions for the relay server and client binaries

use crate::relay::config::{local_hostname, ClientConfig, ServerConfig, Transport};
use crate::relay::error::RelayError;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Relay server arguments
#[derive(Debug, Parser)]
#[command(name = "relay-server")]
#[command(about = "Queue messages sent over TCP or UDP and hand them out one GET at a time")]
pub struct ServerCli {
    /// The port to listen on
    pub port: u16,

    /// The type of socket to use: "tcp" or "udp"
    pub socktype: Transport,

    /// Host to bind (default: this machine's hostname)
    #[arg(long)]
    pub host: Option<String>,

    /// File that log lines are appended to
    #[arg(long, default_value = "server.log")]
    pub log_file: PathBuf,
}

impl ServerCli {
    /// Build the server configuration, resolving the default host
    pub fn config(&self) -> ServerConfig {
        let host = self.host.clone().unwrap_or_else(local_hostname);
        ServerConfig::new(host, self.port, self.socktype)
    }
}

/// Relay client arguments
#[derive(Debug, Parser)]
#[command(name = "relay-client")]
#[command(about = "Send a file to a relay server or fetch one queued message")]
pub struct ClientCli {
    /// The host to connect to
    pub host: String,

    /// The port to connect to
    pub port: u16,

    /// The type of socket to use: "tcp" or "udp"
    pub socktype: Transport,

    /// The mode to use: "send" or "receive"
    pub mode: String,

    /// If mode is "send", the file to send
    pub filename: Option<PathBuf>,

    /// File that log lines are appended to
    #[arg(long, default_value = "client.log")]
    pub log_file: PathBuf,
}

/// What a client invocation should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Send,
    Receive,
}

impl FromStr for Mode {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "send" => Ok(Mode::Send),
            "receive" => Ok(Mode::Receive),
            _ => Err(RelayError::InvalidMode(s.to_string())),
        }
    }
}

/// A validated client request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Send this file's contents
    Send(PathBuf),
    /// Fetch one queued message
    Receive,
}

impl ClientCli {
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.host.clone(), self.port, self.socktype)
    }

    /// Check mode and filename before anything touches the network
    pub fn action(&self) -> Result<ClientAction, RelayError> {
        match self.mode.parse::<Mode>()? {
            Mode::Send => self
                .filename
                .clone()
                .map(ClientAction::Send)
                .ok_or(RelayError::MissingFilename),
            Mode::Receive => Ok(ClientAction::Receive),
        }
    }
}
