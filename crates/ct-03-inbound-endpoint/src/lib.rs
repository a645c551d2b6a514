//! # Inbound Endpoint Subsystem
//!
//! **Subsystem ID:** 3
//!
//! The local HTTP listener that doubles as the chat inbox. Every HTTP
//! request — any verb, any path — with a `Host` header and a non-empty body
//! is accepted as a message delivery. This permissiveness IS the wire
//! protocol; narrowing it (method filters, path routing, authentication)
//! would break compatibility with existing peers.
//!
//! ## Trust model
//!
//! The sender identity is taken verbatim from the request's `Host` header.
//! That header is attacker-controllable and unauthenticated: any peer can
//! claim any identity. The protocol accepts this; do not bolt verification
//! on here.
//!
//! ## Lifecycle
//!
//! [`InboundEndpoint::bind`] binds the listener and returns a
//! [`ListenerHandle`]; shutdown is graceful (in-flight requests drain,
//! appends that already reached the store are never dropped) and
//! idempotent.

pub mod config;
pub mod error;
pub mod listener;

pub use config::{EndpointConfig, DEFAULT_PORT};
pub use error::EndpointError;
pub use listener::{InboundEndpoint, ListenerHandle};
