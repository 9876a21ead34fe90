//! Structured error taxonomy for action dispatch and space-level failures.
//!
//! `ActionFailure` is the one error type that travels all the way from a
//! handler, through `after_action`/`handle_action_error`, to the wire as an
//! `[error]` message's `args.type`/`args.message`. `SpaceError` wraps
//! infrastructure-level failures (transport, registry construction) that
//! never reach the wire.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use thiserror::Error;

/// A structured, wire-shaped action error: a short type tag plus a
/// human-readable message.
///
/// Constructed by handlers via `Err(ActionFailure::new(...))`, by
/// `AgentContext::raise_with`, and internally by the runtime for its
/// built-in error kinds (`schema-error`, `no-such-action`,
/// `access-denied`, `callback-error`, `handler-error`, `timeout`,
/// `space-closed`, `recursive-request`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    pub error_type: String,
    pub message: String,
}

impl ActionFailure {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    pub fn bad_arguments(message: impl Into<String>) -> Self {
        Self::new("bad-arguments", message)
    }
}

impl fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

impl std::error::Error for ActionFailure {}

/// Top-level errors from the registry and space construction/management
/// layers. These are never surfaced as `[error]` wire messages; they are
/// synchronous `Result` failures returned directly to the caller of a
/// `Space`/`ActionRegistry` API.
#[derive(Debug, Error)]
pub enum SpaceError {
    #[error("agent id `{0}` is already registered in this space")]
    DuplicateAgentId(String),

    #[error(transparent)]
    Transport(#[from] crate::space::transport::TransportError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Failures constructing an [`crate::registry::ActionRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("action `{0}` is already registered on this agent")]
    DuplicateAction(String),

    #[error("`help` is a reserved, implicitly-registered action name")]
    ReservedName,
}
