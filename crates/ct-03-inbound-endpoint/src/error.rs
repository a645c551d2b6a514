//! Endpoint error types.

use std::net::Ipv6Addr;
use thiserror::Error;

/// Endpoint-level errors. Binding failures are fatal to session startup.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The listener socket could not be bound (port in use, address not
    /// assignable on this host).
    #[error("failed to bind [{addr}]:{port}: {source}")]
    Bind {
        addr: Ipv6Addr,
        port: u16,
        #[source]
        source: std::io::Error,
    },
}
