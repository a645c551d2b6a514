//! Subscriber side of the message feed.

use std::pin::Pin;
use std::task::{Context, Poll};

use shared_types::Message;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from feed operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The store was dropped.
    #[error("message feed closed")]
    Closed,
}

/// A subscription handle for receiving newly appended messages.
///
/// A lagging subscriber skips the overwritten events and keeps going; the
/// store history itself is never affected.
pub struct MessageFeed {
    receiver: broadcast::Receiver<Message>,
}

impl MessageFeed {
    pub(crate) fn new(receiver: broadcast::Receiver<Message>) -> Self {
        Self { receiver }
    }

    /// Receive the next appended message.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn recv(&mut self) -> Option<Message> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "feed subscriber lagged, events skipped");
                    continue;
                }
            }
        }
    }

    /// Try to receive the next message without blocking.
    ///
    /// - `Ok(Some(message))` — a message was waiting
    /// - `Ok(None)` — nothing waiting (would block)
    /// - `Err(FeedError::Closed)` — the store was dropped
    pub fn try_recv(&mut self) -> Result<Option<Message>, FeedError> {
        loop {
            match self.receiver.try_recv() {
                Ok(message) => return Ok(Some(message)),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => return Err(FeedError::Closed),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            }
        }
    }
}

/// A stream wrapper over [`MessageFeed`].
///
/// Implements `tokio_stream::Stream` for use with stream combinators.
pub struct MessageStream {
    feed: MessageFeed,
}

impl MessageStream {
    /// Wrap a feed subscription in a stream.
    #[must_use]
    pub fn new(feed: MessageFeed) -> Self {
        Self { feed }
    }
}

impl Stream for MessageStream {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.feed.try_recv() {
            Ok(Some(message)) => Poll::Ready(Some(message)),
            Ok(None) => {
                // Nothing buffered yet; re-poll after other tasks run.
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Err(FeedError::Closed) => Poll::Ready(None),
        }
    }
}
