//! Message schema, validation, and the wire envelope.
//!
//! This is the canonical data model flowing between agents: a `Message` is
//! a validated record carrying an action invocation or a `[response]`/
//! `[error]` reply, identified by its `meta.id` and optionally correlated
//! to a prior message via `meta.parent_id`.
//!
//! # Modules
//!
//! - [`types`]: `Message`, `PartialMessage`, `Action`, and `stamp`.
//! - [`validate`]: send-time schema validation.

pub mod types;
pub mod validate;

pub use types::{
    stamp, Action, HelpIndex, Message, Meta, PartialMessage, ERROR_ACTION, HELP_ACTION,
    RESPONSE_ACTION,
};
pub use validate::{validate_partial, SchemaError};
