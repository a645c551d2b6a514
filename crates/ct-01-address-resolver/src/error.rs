//! Resolver error types.
//!
//! Discovery has exactly one failure kind from the caller's point of view:
//! the address is unavailable. The cause is preserved for logs and tests.

use thiserror::Error;

/// Discovery failed; this node's own IPv6 address could not be determined.
///
/// Fatal to session startup. No retry is performed at this layer.
#[derive(Debug, Error)]
#[error("unable to determine own IPv6 address: {cause}")]
pub struct AddressUnavailable {
    /// What actually went wrong underneath.
    #[source]
    pub cause: AddressLookupCause,
}

/// The underlying reason a lookup failed.
#[derive(Debug, Error)]
pub enum AddressLookupCause {
    /// The lookup did not complete within the configured timeout.
    #[error("lookup request timed out")]
    TimedOut,

    /// DNS, connect, or other transport-level failure.
    #[error("lookup transport failure")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("lookup service answered status {0}")]
    BadStatus(u16),

    /// The service answered 2xx with an empty (or whitespace-only) body.
    #[error("lookup service returned an empty body")]
    EmptyBody,

    /// The body was non-empty but not an IPv6 literal.
    #[error("lookup service returned a non-IPv6 body: {0:?}")]
    NotAnIpv6Literal(String),
}

impl AddressUnavailable {
    pub(crate) fn new(cause: AddressLookupCause) -> Self {
        Self { cause }
    }
}
