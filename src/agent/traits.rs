//! The `Agent` trait: lifecycle hooks invoked around message dispatch.
//!
//! None of these hooks see a concrete message type: the crate's `Message`
//! is a single concrete struct (see `DESIGN.md` for why this departs from
//! a fully generic actor trait). An agent's own business state lives on
//! `Self`; actions are bound separately via an [`crate::registry::ActionRegistry`].

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use serde_json::Value;

// Layer 3: Internal module imports
use super::context::AgentContext;
use crate::error::ActionFailure;
use crate::message::Message;

/// The outcome of one handler invocation, passed to `after_action`.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Value(Option<Value>),
    Error(ActionFailure),
}

/// Lifecycle and cross-cutting callbacks for one agent type.
///
/// All methods have permissive defaults (no-op / always-allow) so a minimal
/// agent need only implement the registered action handlers themselves.
#[async_trait]
pub trait Agent: Send + Sync + 'static {
    /// Whether a broadcast this agent itself sends is delivered back to it.
    fn receive_own_broadcasts(&self) -> bool {
        false
    }

    /// Invoked once after the agent joins a space and begins receiving
    /// messages. `ctx.send`/`respond_with` are usable here; `ctx.request`
    /// returns a `space-closed` error since there is no handler invocation
    /// to correlate a reply against.
    async fn after_add(&mut self, _ctx: &mut AgentContext<Self>) {}

    /// Invoked once before the agent's inbox is drained and its runtime
    /// stops. Same messaging restrictions as `after_add`.
    async fn before_remove(&mut self, _ctx: &mut AgentContext<Self>) {}

    /// Runs before a matched, access-permitted handler is invoked. An
    /// `Err` here skips the handler and `after_action`, replying
    /// `callback-error`.
    async fn before_action(&mut self, _message: &Message) -> Result<(), ActionFailure> {
        Ok(())
    }

    /// Runs after a handler returns, with its outcome. Not called when
    /// dispatch is short-circuited by an access decision or a
    /// `before_action`/`request_permission` failure.
    async fn after_action(&mut self, _message: &Message, _outcome: &ActionOutcome) {}

    /// Called only for actions registered `requires-confirmation`. `Ok(true)`
    /// allows the action; `Ok(false)` denies it; `Err` replies
    /// `callback-error`.
    async fn request_permission(&mut self, _message: &Message) -> Result<bool, ActionFailure> {
        Ok(true)
    }

    /// Fire-and-forget consumer of a `[response]` that arrived with no
    /// matching `request` waiter.
    async fn handle_action_value(&mut self, _value: Value, _original: &Message) {}

    /// Fire-and-forget consumer of an `[error]` that arrived with no
    /// matching `request` waiter.
    async fn handle_action_error(&mut self, _error: &ActionFailure, _original: &Message) {}
}
