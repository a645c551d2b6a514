//! # Peer Session Subsystem
//!
//! **Subsystem ID:** 5
//!
//! The orchestrating façade. One [`PeerSession`] composes the address
//! resolver, message store, inbound endpoint, and outbound sender into a
//! single lifecycle and is the only type the presentation layer talks to.
//!
//! ## Lifecycle
//!
//! ```text
//! NotStarted ──start()──→ Starting ──resolve + bind ok──→ Running
//!                             │
//!                             └──────either step fails──→ Failed (terminal)
//! ```
//!
//! - `start` is a strictly sequential two-step suspension: the listener is
//!   never bound before the node's own address is known.
//! - A second `start` while `Starting`/`Running` (or after `Failed`) is a
//!   usage error; it fails without altering existing state.
//! - `Failed` is terminal: recovery means a fresh session instance.
//!
//! Sessions are plain caller-owned values, not process globals; tests run
//! several of them side by side in one process.

pub mod config;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use error::{NotRunning, SendError, SessionError, StartError};
pub use session::{PeerSession, SessionStatus};

// The session's public surface hands these types to callers.
pub use ct_02_message_store::{MessageFeed, MessageStream};
pub use ct_04_outbound_sender::DeliveryOutcome;
pub use shared_types::Message;
