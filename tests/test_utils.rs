//! Test utilities and fixtures for msgrelay
//!
//! Helpers for starting throwaway servers on ephemeral ports and for waiting
//! on work that the server finishes on a background task.

#![allow(dead_code)]

use msgrelay::relay::{
    ClientConfig, MessageQueue, RelayClient, ServerConfig, ServerInstance, Transport,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write `contents` to a fresh file inside `dir`
pub fn write_temp_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("Failed to write temp file");
    path
}

/// Start a server on 127.0.0.1 with an ephemeral port and a fresh queue
pub async fn start_server(transport: Transport) -> ServerInstance {
    let config = ServerConfig::new("127.0.0.1", 0, transport);
    ServerInstance::start(config, Arc::new(MessageQueue::new()))
        .await
        .expect("Failed to start server")
}

/// Client pointed at a running server
pub fn client_for(server: &ServerInstance) -> RelayClient {
    let addr = server.local_addr();
    RelayClient::new(ClientConfig::new(
        addr.ip().to_string(),
        addr.port(),
        server.config().transport,
    ))
}

/// Wait until the queue holds exactly `expected` messages
pub async fn wait_for_len(queue: &MessageQueue, expected: usize, timeout_secs: u64) -> bool {
    use tokio::time::{sleep, Instant};

    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(timeout_secs) {
        if queue.len().await == expected {
            return true;
        }
        sleep(Duration::from_millis(20)).await;
    }
    false
}

/// Run a future with a deadline so a lost datagram fails the test instead of hanging
pub async fn with_timeout<F: std::future::Future>(future: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(5), future)
        .await
        .expect("Timed out waiting for the server")
}
