// Inbound request classification

use crate::relay::error::Result;

/// Prefix that turns a payload into a read request
pub const GET_COMMAND: &str = "<<GET>>";

/// A single classified payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Hand back one queued message
    Get,
    /// Queue the payload as-is
    Put(String),
}

impl Request {
    /// Decode a raw payload and classify it.
    ///
    /// The whole payload must be valid UTF-8, including the part after a
    /// `<<GET>>` prefix. Only a byte-exact prefix counts as a GET; a payload
    /// that merely contains the command is queued verbatim.
    pub fn parse(payload: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(payload)?;

        if text.starts_with(GET_COMMAND) {
            Ok(Request::Get)
        } else {
            Ok(Request::Put(text.to_string()))
        }
    }
}
