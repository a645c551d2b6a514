//! # Shared Types Crate
//!
//! This crate contains the domain entities shared across the Chatra
//! subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the [`Message`] value type is defined once,
//!   here, and flows unchanged through the inbound endpoint, the store, and
//!   the presentation layer.
//! - **Valid by Construction**: a [`Message`] cannot be built from an empty
//!   body or a malformed sender host, so downstream crates never re-validate.

pub mod message;

pub use message::{InvalidMessage, Message};
