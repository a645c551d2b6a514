//! # Outbound Sender Subsystem
//!
//! **Subsystem ID:** 4
//!
//! Delivers one message to one remote peer: a single HTTP POST with the
//! message text as the body and the sender's own bound address in the
//! `Host` header (the receiver derives the sender identity from nothing
//! else).
//!
//! ## Outcome classification
//!
//! Each call produces exactly one [`DeliveryOutcome`]:
//!
//! | condition                      | outcome            |
//! |--------------------------------|--------------------|
//! | response status 200            | `Delivered`        |
//! | any other response status      | `Rejected(status)` |
//! | round-trip timeout elapsed     | `TimedOut`         |
//! | DNS / connect / transport fail | `Unreachable`      |
//!
//! No retries; delivery failures never affect session state. Argument
//! violations (relative or non-http target, empty text) fail fast with
//! [`InvalidArgument`] before any network I/O.

pub mod config;
pub mod error;
pub mod outcome;
pub mod sender;

pub use config::{ConfigError, SenderConfig, DEFAULT_SEND_TIMEOUT};
pub use error::{HttpClientError, InvalidArgument};
pub use outcome::DeliveryOutcome;
pub use sender::OutboundSender;
