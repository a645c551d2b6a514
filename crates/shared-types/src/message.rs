//! # Core Domain Entities
//!
//! Defines the chat message entity exchanged between peers.
//!
//! A peer's identity is the URI advertised in its HTTP `Host` header; there
//! is no other identity channel on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Why a candidate message was rejected at the ingestion boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidMessage {
    /// The request body was empty or whitespace-only.
    #[error("message text is empty")]
    EmptyText,

    /// The declared host did not form a valid sender URI.
    #[error("sender host does not form a valid URI: {0}")]
    BadSenderHost(#[source] url::ParseError),
}

/// A single received chat message.
///
/// Immutable value: once appended to the store it is never mutated. The
/// timestamp is assigned by the *receiver* on arrival; senders do not
/// transmit one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identity of the sending peer, as `http://<declared-host>`.
    pub sender: Url,
    /// Arrival instant, stamped by the receiving endpoint.
    pub timestamp: DateTime<Utc>,
    /// Raw UTF-8 body, stored untrimmed. No length cap.
    pub text: String,
}

impl Message {
    /// Build a message as received from the wire.
    ///
    /// `host` is the inbound request's `Host` header value (authority form,
    /// e.g. `[2001:db8::2]:40180`); the sender URI becomes
    /// `http://<host>`. The arrival timestamp is stamped here.
    ///
    /// Rejects empty/whitespace-only text and hosts that do not parse as a
    /// URI authority, so an invalid message can never reach the store.
    pub fn received(host: &str, text: impl Into<String>) -> Result<Self, InvalidMessage> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InvalidMessage::EmptyText);
        }
        let sender =
            Url::parse(&format!("http://{host}")).map_err(InvalidMessage::BadSenderHost)?;
        Ok(Self {
            sender,
            timestamp: Utc::now(),
            text,
        })
    }
}
