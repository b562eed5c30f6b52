// Message relay: a single shared FIFO queue served over TCP or UDP
//
// Clients either push a payload onto the queue or send the `<<GET>>`
// command to pop the oldest payload. Each inbound connection or datagram
// is handled on its own task.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod queue;
pub mod request;
pub mod server;

pub use cli::{ClientAction, ClientCli, Mode, ServerCli};
pub use client::RelayClient;
pub use config::{ClientConfig, ServerConfig, Transport, MAX_MESSAGE_LENGTH};
pub use error::{RelayError, Result};
pub use queue::{Dequeued, MessageQueue};
pub use request::{Request, GET_COMMAND};
pub use server::ServerInstance;
