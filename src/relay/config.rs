// Server and client configuration

use crate::relay::error::RelayError;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;

/// Size of every read buffer on both sides of the wire.
///
/// A single read or datagram larger than this is cut off at this many bytes;
/// the remainder is dropped rather than reported as an error.
pub const MAX_MESSAGE_LENGTH: usize = 3000;

/// Transport a server listens on or a client connects with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Connection-oriented stream, one request per connection
    Tcp,
    /// Connectionless datagrams, replies go to the sender's address
    Udp,
}

impl Transport {
    /// Reply text sent to a GET when the queue has nothing to hand out.
    /// TCP and UDP use different wording.
    pub fn empty_response(&self) -> &'static str {
        match self {
            Transport::Tcp => "Error - no messages in queue.",
            Transport::Udp => "Error: No messages.",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Tcp => write!(f, "TCP"),
            Transport::Udp => write!(f, "UDP"),
        }
    }
}

impl FromStr for Transport {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Transport::Tcp),
            "udp" => Ok(Transport::Udp),
            _ => Err(RelayError::InvalidTransport(s.to_string())),
        }
    }
}

/// Settings for a relay server instance
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host name or address to bind
    pub host: String,
    /// Port to bind, 0 picks an ephemeral port
    pub port: u16,
    /// Socket kind to listen on
    pub transport: Transport,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, transport: Transport) -> Self {
        Self {
            host: host.into(),
            port,
            transport,
        }
    }

    /// Bind target in `host:port` form, for logs and error messages
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for a one-shot client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub transport: Transport,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16, transport: Transport) -> Self {
        Self {
            host: host.into(),
            port,
            transport,
        }
    }
}

/// Name of the machine the server runs on, as reported by the OS.
///
/// Falls back to `localhost` when the name is empty or not valid UTF-8.
pub fn local_hostname() -> String {
    hostname_or_localhost(gethostname::gethostname())
}

fn hostname_or_localhost(name: OsString) -> String {
    match name.into_string() {
        Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => "localhost".to_string(),
    }
}
