// Classify-and-respond step shared by the TCP and UDP listeners

use crate::relay::config::Transport;
use crate::relay::error::Result;
use crate::relay::queue::MessageQueue;
use crate::relay::request::Request;

/// Handle one payload against the queue.
///
/// Returns the bytes to send back to the peer for a GET, or `None` after a
/// PUT. A payload that is not valid text fails with `RelayError::Decode`
/// and leaves the queue untouched.
pub async fn process(
    payload: &[u8],
    queue: &MessageQueue,
    transport: Transport,
) -> Result<Option<Vec<u8>>> {
    match Request::parse(payload)? {
        Request::Get => {
            tracing::info!(
                "-> Client is requesting message from queue (current size: {})",
                queue.len().await
            );

            let response = queue
                .try_dequeue()
                .await
                .into_response(transport.empty_response());

            Ok(Some(response.into_bytes()))
        }
        Request::Put(message) => {
            tracing::info!(
                "-> Client sent message to be added to queue (current size: {})",
                queue.len().await
            );

            let size = queue.enqueue(message).await;
            tracing::info!("-> Added message to queue (new size: {})", size);

            Ok(None)
        }
    }
}
