// Error types for the relay server and client

use std::net::SocketAddr;
use thiserror::Error;

/// Errors raised by the relay library
#[derive(Debug, Error)]
pub enum RelayError {
    /// Socket or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload was not valid UTF-8 text
    #[error("payload is not valid text: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// The listening socket could not be bound
    #[error("failed to bind {transport} socket on {addr}: {source}")]
    Bind {
        transport: String,
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Host name did not resolve to any address
    #[error("could not resolve address '{0}'")]
    Resolve(String),

    /// Socket type other than tcp or udp
    #[error("invalid socket type '{0}', expected \"tcp\" or \"udp\"")]
    InvalidTransport(String),

    /// Client mode other than send or receive
    #[error("Invalid mode '{0}' specified. Exiting")]
    InvalidMode(String),

    /// Send mode was requested without a file
    #[error("Filename must be supplied in 'send' mode. Exiting")]
    MissingFilename,

    /// A response could not be delivered to a datagram peer
    #[error("failed to reply to {peer}: {source}")]
    Reply {
        peer: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RelayError>;
