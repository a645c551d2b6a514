//! # Address Resolver Subsystem
//!
//! **Subsystem ID:** 1
//!
//! Discovers this node's own externally-routable IPv6 address by querying an
//! address-echo service: a single GET whose response body is expected to be
//! a bare IPv6 literal.
//!
//! ## Contract
//!
//! - Exactly one request per call; retry policy belongs to the caller.
//! - Every failure mode (timeout, transport, bad status, empty body,
//!   non-IPv6 body) collapses into one error kind,
//!   [`AddressUnavailable`], carrying a typed [`AddressLookupCause`].
//!
//! ## Example
//!
//! ```no_run
//! use ct_01_address_resolver::{resolve_own_address, ResolverConfig};
//!
//! # async fn run() {
//! let config = ResolverConfig::default();
//! match resolve_own_address(&config).await {
//!     Ok(address) => println!("reachable at {address}"),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod resolver;

pub use config::{ConfigError, ResolverConfig, DEFAULT_LOOKUP_ENDPOINT, DEFAULT_LOOKUP_TIMEOUT};
pub use error::{AddressLookupCause, AddressUnavailable};
pub use resolver::resolve_own_address;
