//! msgrelay - Minimal message relay over TCP or UDP
//!
//! A server keeps one in-memory FIFO queue. Any payload a client sends is
//! queued; a payload starting with `<<GET>>` pops the oldest message and
//! sends it back. A small one-shot client covers both directions.

pub mod logging;
pub mod relay;

pub use relay::{MessageQueue, RelayClient, RelayError, ServerInstance, Transport};
