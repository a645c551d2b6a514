//! Sender error types.

use thiserror::Error;

/// A send argument was rejected before any network I/O happened.
///
/// Callers are expected to pre-validate (the presentation layer filters
/// these); the sender still refuses cleanly rather than crashing or
/// issuing a doomed request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid send argument: {0}")]
pub struct InvalidArgument(pub String);

/// The underlying HTTP client could not be constructed.
///
/// Surfaced only from [`OutboundSender::new`], never from a send.
///
/// [`OutboundSender::new`]: crate::sender::OutboundSender::new
#[derive(Debug, Error)]
#[error("failed to construct HTTP client: {0}")]
pub struct HttpClientError(#[from] reqwest::Error);
