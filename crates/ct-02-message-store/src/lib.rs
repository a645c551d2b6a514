//! # Message Store Subsystem
//!
//! **Subsystem ID:** 2
//!
//! An ordered, append-only, observable log of received messages.
//!
//! ## Guarantees
//!
//! - Insertion order is arrival order; once appended, a message is never
//!   mutated or removed.
//! - Appends are atomic: concurrent inbound handlers serialize on the store
//!   lock, and the feed emits exactly one event per append, in append order.
//! - Slow subscribers lag and skip feed events (the store history stays
//!   intact); they never block the append path.
//!
//! ```text
//! ┌──────────────┐  append()   ┌───────────────┐  feed event   ┌────────────┐
//! │ Inbound      │ ──────────→ │ MessageStore  │ ────────────→ │ Subscriber │
//! │ handlers (N) │             │ Vec + feed    │               │ (UI, ...)  │
//! └──────────────┘             └───────────────┘               └────────────┘
//! ```

pub mod feed;
pub mod store;

pub use feed::{FeedError, MessageFeed, MessageStream};
pub use store::MessageStore;

/// Messages buffered per feed subscriber before lagging sets in.
pub const DEFAULT_FEED_CAPACITY: usize = 1024;
