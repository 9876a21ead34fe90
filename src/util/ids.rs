//! Identifier types used by the message schema.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use uuid::Uuid;

/// A globally unique message identifier.
///
/// Generated at send time via [`MessageId::new`]; never constructed by agent
/// code directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Generates a new random (v4) message id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The reserved broadcast target, delivered to every current member of a space.
pub const BROADCAST: &str = "*";

/// Returns whether `to` denotes a broadcast send.
pub fn is_broadcast(to: &str) -> bool {
    to == BROADCAST
}
