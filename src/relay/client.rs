// One-shot relay client

use crate::relay::config::{ClientConfig, Transport, MAX_MESSAGE_LENGTH};
use crate::relay::error::{RelayError, Result};
use crate::relay::request::GET_COMMAND;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

/// Client for a single send or receive against a relay server
pub struct RelayClient {
    config: ClientConfig,
}

impl RelayClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Send a file's text followed by a newline as one payload.
    ///
    /// Returns the length of the file contents, not counting the newline.
    pub async fn send_file(&self, path: &Path) -> Result<usize> {
        let contents = tokio::fs::read_to_string(path).await?;
        let payload = format!("{}\n", contents);

        self.send(payload.as_bytes()).await?;
        tracing::info!("Sent: {} bytes", contents.len());

        Ok(contents.len())
    }

    /// Send raw bytes without waiting for any reply
    pub async fn send(&self, payload: &[u8]) -> Result<()> {
        let addr = self.resolve().await?;

        match self.config.transport {
            Transport::Tcp => {
                let mut stream = TcpStream::connect(addr).await?;
                stream.write_all(payload).await?;
            }
            Transport::Udp => {
                let socket = Self::connect_udp(addr).await?;
                socket.send(payload).await?;
            }
        }

        tracing::debug!("Wrote {} bytes to {}", payload.len(), addr);
        Ok(())
    }

    /// Ask the server for one message and return its reply.
    ///
    /// The reply is either the oldest queued message or the server's
    /// empty-queue text. Only one read is made, so replies are capped at
    /// `MAX_MESSAGE_LENGTH` bytes.
    pub async fn receive(&self) -> Result<String> {
        let addr = self.resolve().await?;
        let mut buffer = vec![0u8; MAX_MESSAGE_LENGTH];

        let n = match self.config.transport {
            Transport::Tcp => {
                let mut stream = TcpStream::connect(addr).await?;
                stream.write_all(GET_COMMAND.as_bytes()).await?;
                stream.read(&mut buffer).await?
            }
            Transport::Udp => {
                let socket = Self::connect_udp(addr).await?;
                socket.send(GET_COMMAND.as_bytes()).await?;
                socket.recv(&mut buffer).await?
            }
        };

        buffer.truncate(n);
        let received = String::from_utf8(buffer).map_err(|e| RelayError::Decode(e.utf8_error()))?;
        tracing::info!("Received: \n {}", received);

        Ok(received)
    }

    async fn resolve(&self) -> Result<SocketAddr> {
        let host = self.config.host.as_str();
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, self.config.port))
            .await?
            .collect();

        prefer_ipv4(&addrs)
            .ok_or_else(|| RelayError::Resolve(format!("{}:{}", host, self.config.port)))
    }

    /// Bind an ephemeral local socket of the right family and fix its peer
    async fn connect_udp(addr: SocketAddr) -> Result<UdpSocket> {
        let local = if addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(local).await?;
        socket.connect(addr).await?;
        Ok(socket)
    }
}

/// First IPv4 address, or the first address of any family if there is none.
///
/// Names like `localhost` often list `::1` ahead of `127.0.0.1`, while servers
/// usually listen on IPv4 only.
fn prefer_ipv4(addrs: &[SocketAddr]) -> Option<SocketAddr> {
    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
}
