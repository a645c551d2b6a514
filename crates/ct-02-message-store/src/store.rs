//! The append-only message log and its change feed.

use parking_lot::RwLock;
use shared_types::Message;
use tokio::sync::broadcast;
use tracing::debug;

use crate::feed::{MessageFeed, MessageStream};
use crate::DEFAULT_FEED_CAPACITY;

/// Ordered, append-only collection of received messages.
///
/// Shared across inbound handlers via `Arc`; all methods take `&self`.
/// Change notification uses `tokio::sync::broadcast`: one event per append,
/// emitted only after the message is part of the in-memory sequence.
pub struct MessageStore {
    /// The log. Insertion order is arrival order.
    messages: RwLock<Vec<Message>>,

    /// Feed sender for append notifications.
    feed_tx: broadcast::Sender<Message>,
}

impl MessageStore {
    /// Create a store with the default feed capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_feed_capacity(DEFAULT_FEED_CAPACITY)
    }

    /// Create a store with a specific per-subscriber feed capacity.
    #[must_use]
    pub fn with_feed_capacity(capacity: usize) -> Self {
        let (feed_tx, _) = broadcast::channel(capacity);
        Self {
            messages: RwLock::new(Vec::new()),
            feed_tx,
        }
    }

    /// Append a received message and notify the feed.
    ///
    /// Returns the new length of the log. The feed event is emitted inside
    /// the append critical section, so subscribers observe events in exactly
    /// append order and never see a message before `snapshot` would.
    pub fn append(&self, message: Message) -> usize {
        let mut messages = self.messages.write();
        messages.push(message.clone());
        let len = messages.len();

        // broadcast::send never blocks; Err just means nobody is listening.
        if self.feed_tx.send(message).is_err() {
            debug!(total = len, "message appended with no feed subscribers");
        }

        len
    }

    /// A point-in-time copy of the whole log, in arrival order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// Number of messages appended so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    /// Whether the log is still empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }

    /// Subscribe to future appends.
    ///
    /// The feed starts at the subscription instant; use [`snapshot`] for
    /// history. New appends arrive without re-scanning the log.
    ///
    /// [`snapshot`]: MessageStore::snapshot
    #[must_use]
    pub fn subscribe(&self) -> MessageFeed {
        MessageFeed::new(self.feed_tx.subscribe())
    }

    /// Subscribe as a `tokio_stream::Stream` of messages.
    #[must_use]
    pub fn message_stream(&self) -> MessageStream {
        MessageStream::new(self.subscribe())
    }

    /// Number of live feed subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.feed_tx.receiver_count()
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}
