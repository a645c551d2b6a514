//! Delivery outcome classification.

use std::fmt;

/// Classified result of one delivery attempt.
///
/// Exactly one classification per call — a timed-out request never also
/// reports a status, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The receiving peer answered 200; the message is in its store.
    Delivered,

    /// The peer answered with a non-200 status (e.g. 400 for a message it
    /// considered malformed).
    Rejected(u16),

    /// The configured round-trip timeout elapsed first.
    TimedOut,

    /// Transport-level failure: DNS, connection refused, unreachable.
    Unreachable,
}

impl DeliveryOutcome {
    /// `true` only for [`DeliveryOutcome::Delivered`].
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Rejected(code) => write!(f, "rejected by peer (status {code})"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Unreachable => write!(f, "peer unreachable"),
        }
    }
}
