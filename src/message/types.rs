//! The canonical message envelope and its pre-send builder.

// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 2: Third-party crate imports
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Layer 3: Internal module imports
use crate::util::MessageId;

/// Reserved action name carrying a successful return value in reply to a request.
pub const RESPONSE_ACTION: &str = "[response]";

/// Reserved action name carrying a structured error in reply to a request.
pub const ERROR_ACTION: &str = "[error]";

/// The built-in discovery action every agent exposes.
pub const HELP_ACTION: &str = "help";

/// Free-form message metadata. `id` and `parent_id` are reserved and
/// core-managed; all other keys are opaque and pass through unchanged.
pub type Meta = Map<String, Value>;

/// A named operation invocation: `name` plus an open argument map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Map::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

/// A fully stamped message, as observed by recipients and carried on the wire.
///
/// Constructed only by [`stamp`](super::validate::stamp); agent code builds a
/// [`PartialMessage`] and hands it to `send`/`request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub meta: Meta,
    pub from: String,
    pub to: String,
    pub action: Action,
}

impl Message {
    /// The message's `meta.id`, always present on a stamped message.
    pub fn id(&self) -> Option<&str> {
        self.meta.get("id").and_then(Value::as_str)
    }

    /// The `meta.id` of the message that caused this one, if any.
    pub fn parent_id(&self) -> Option<&str> {
        self.meta.get("parent_id").and_then(Value::as_str)
    }

    /// Whether this message targets every current member of the space.
    pub fn is_broadcast(&self) -> bool {
        crate::util::is_broadcast(&self.to)
    }
}

/// A caller-constructed message awaiting `from`/`meta.id` stamping.
///
/// Deliberately has no `from` field: forging the sender is impossible by
/// construction rather than by a runtime check.
#[derive(Debug, Clone, Default)]
pub struct PartialMessage {
    pub to: String,
    pub action: Action,
    pub meta: Meta,
}

impl PartialMessage {
    pub fn new(to: impl Into<String>, action: Action) -> Self {
        Self {
            to: to.into(),
            action,
            meta: Meta::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn with_parent_id(self, parent_id: impl Into<String>) -> Self {
        self.with_meta("parent_id", Value::String(parent_id.into()))
    }
}

/// Stamps a validated partial message with `from`, a fresh `meta.id`, and
/// (unless already present) a `meta.sent_at` timestamp.
///
/// Callers must validate the partial message first; this function does not
/// re-check shape.
pub fn stamp(partial: PartialMessage, from: &str) -> Message {
    let mut meta = partial.meta;
    meta.insert(
        "id".to_string(),
        Value::String(MessageId::new().to_string()),
    );
    meta.entry("sent_at")
        .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
    Message {
        meta,
        from: from.to_string(),
        to: partial.to,
        action: partial.action,
    }
}

/// A help-entry map as returned by the built-in `help` action with no
/// argument: action name to introspected descriptor, serialized as a JSON
/// object on the wire.
pub type HelpIndex = BTreeMap<String, Value>;
