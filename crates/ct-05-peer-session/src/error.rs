//! Session error types.

use ct_01_address_resolver::AddressUnavailable;
use ct_03_inbound_endpoint::EndpointError;
use ct_04_outbound_sender::{HttpClientError, InvalidArgument};
use thiserror::Error;

/// Session construction failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A subsystem configuration failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// The outbound HTTP client could not be constructed.
    #[error(transparent)]
    Client(#[from] HttpClientError),
}

/// Why `start` failed.
///
/// Both failure kinds are fatal: the session transitions to `Failed` and
/// stays there.
#[derive(Debug, Error)]
pub enum StartError {
    /// The session was already started (or has already failed); a session
    /// starts at most once.
    #[error("peer session already started")]
    AlreadyStarted,

    /// Own-address discovery failed.
    #[error(transparent)]
    AddressUnavailable(#[from] AddressUnavailable),

    /// The inbound listener could not be bound.
    #[error("failed to bind inbound endpoint: {0}")]
    BindFailed(#[from] EndpointError),
}

/// An operation that requires `Running` was invoked in another state.
///
/// A caller programming error: surfaced, never retried internally.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("peer session is not running")]
pub struct NotRunning;

/// Why `send_message` refused to attempt a delivery.
///
/// Distinct from [`DeliveryOutcome`]: a `SendError` means no attempt was
/// made at all.
///
/// [`DeliveryOutcome`]: ct_04_outbound_sender::DeliveryOutcome
#[derive(Debug, Error)]
pub enum SendError {
    /// The session is not `Running`.
    #[error(transparent)]
    NotRunning(#[from] NotRunning),

    /// The target or text was rejected before any network I/O.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}
