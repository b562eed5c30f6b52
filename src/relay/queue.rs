// Shared FIFO message queue

use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Outcome of a non-blocking dequeue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dequeued {
    /// The oldest queued message, now removed from the queue
    Message(String),
    /// Nothing was queued at the time of the call
    Empty,
}

impl Dequeued {
    /// Reply text for a GET: the message itself, or `empty_text`
    pub fn into_response(self, empty_text: &str) -> String {
        match self {
            Dequeued::Message(message) => message,
            Dequeued::Empty => empty_text.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Dequeued::Empty)
    }
}

/// Unbounded in-memory FIFO of text messages.
///
/// One instance is shared by every handler task of a server through an `Arc`.
/// Every operation takes the inner lock, so concurrent dequeues never return
/// the same message and no enqueue is lost.
#[derive(Debug, Default)]
pub struct MessageQueue {
    messages: Mutex<VecDeque<String>>,
}

impl MessageQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(VecDeque::new()),
        }
    }

    /// Append a message to the tail and return the new size
    pub async fn enqueue(&self, message: String) -> usize {
        let mut queue = self.messages.lock().await;
        queue.push_back(message);
        queue.len()
    }

    /// Remove the head of the queue, or report `Empty` without waiting
    pub async fn try_dequeue(&self) -> Dequeued {
        let mut queue = self.messages.lock().await;
        match queue.pop_front() {
            Some(message) => Dequeued::Message(message),
            None => Dequeued::Empty,
        }
    }

    /// Number of queued messages
    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }
}
