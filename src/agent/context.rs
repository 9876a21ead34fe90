//! `AgentContext`: the handle a handler or lifecycle callback uses to send,
//! respond, and make synchronous requests.

// Layer 1: Standard library imports
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;

// Layer 3: Internal module imports
use super::traits::Agent;
use crate::error::ActionFailure;
use crate::message::{stamp, validate_partial, Action, Message, PartialMessage, ERROR_ACTION, RESPONSE_ACTION};
use crate::space::transport::Transport;

/// What a `request` waiter is ultimately completed with.
pub(crate) enum ReplyOutcome {
    Value(Value),
    Error(ActionFailure),
}

/// Per-agent shared state needed to construct a context for each dispatched
/// message: the agent's own id, its transport handle, and its table of
/// outstanding `request` waiters.
#[derive(Clone)]
pub(crate) struct ContextShared {
    pub(crate) self_id: String,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) pending: Arc<DashMap<String, oneshot::Sender<ReplyOutcome>>>,
}

/// The handle passed (by `&mut`) to a handler or lifecycle callback.
///
/// Constructed fresh by the runtime for each dispatched message; not
/// constructible by agent code.
pub struct AgentContext<T: Agent> {
    shared: ContextShared,
    current: Option<Message>,
    /// Gates `request` only; `send`/`respond_with` work regardless. `false`
    /// for the contexts passed to `after_add`/`before_remove`, where there is
    /// no handler invocation to correlate a reply against.
    request_allowed: bool,
    responded: AtomicBool,
    _marker: PhantomData<T>,
}

impl<T: Agent> AgentContext<T> {
    pub(crate) fn new(shared: ContextShared, current: Option<Message>, request_allowed: bool) -> Self {
        Self {
            shared,
            current,
            request_allowed,
            responded: AtomicBool::new(false),
            _marker: PhantomData,
        }
    }

    pub(crate) fn did_respond(&self) -> bool {
        self.responded.load(Ordering::SeqCst)
    }

    /// The message currently being handled, if any.
    pub fn current_message(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    /// Stamps, validates, and publishes `partial`, returning its assigned
    /// `meta.id`. Validation failures are synchronous; delivery failures are
    /// logged and the message is dropped rather than surfaced as an error.
    pub async fn send(&self, partial: PartialMessage) -> Result<String, ActionFailure> {
        validate_partial(&partial).map_err(|err| ActionFailure::new("schema-error", err.to_string()))?;
        let stamped = stamp(partial, &self.shared.self_id);
        let id = stamped
            .id()
            .expect("stamp() always assigns meta.id")
            .to_string();
        if let Err(err) = self.shared.transport.publish(stamped).await {
            tracing::warn!(error = %err, "failed to publish message");
        }
        Ok(id)
    }

    /// Sends a `[response]` correlated to `current_message()`. Callable
    /// multiple times per handler invocation; suppresses the handler's own
    /// auto-reply.
    pub async fn respond_with(&self, value: impl Into<Value>) -> Result<String, ActionFailure> {
        self.responded.store(true, Ordering::SeqCst);
        let current = self
            .current
            .as_ref()
            .expect("respond_with called outside a handler invocation");
        let partial = reply_partial(current, RESPONSE_ACTION, "value", value.into());
        self.send(partial).await
    }

    /// Sends an `[error]` correlated to `current_message()`. Does not by
    /// itself suppress the handler's own auto-`[error]` reply if the
    /// handler subsequently returns `Err`.
    pub async fn raise_with(&self, error: &ActionFailure) -> Result<String, ActionFailure> {
        let current = self
            .current
            .as_ref()
            .expect("raise_with called outside a handler invocation");
        let mut partial = reply_partial(current, ERROR_ACTION, "type", Value::String(error.error_type.clone()));
        partial.action.args.insert("message".to_string(), Value::String(error.message.clone()));
        self.send(partial).await
    }

    /// Sends `partial`, then awaits the correlated `[response]`/`[error]`
    /// or `timeout`. MUST NOT be called from `after_add`/`before_remove`.
    pub async fn request(&self, partial: PartialMessage, timeout: Duration) -> Result<Value, ActionFailure> {
        if !self.request_allowed {
            return Err(ActionFailure::new(
                "space-closed",
                "request() may not be called from after_add or before_remove",
            ));
        }
        if partial.to == self.shared.self_id {
            return Err(ActionFailure::new("recursive-request", "recursive request on self"));
        }
        validate_partial(&partial).map_err(|err| ActionFailure::new("schema-error", err.to_string()))?;
        let stamped = stamp(partial, &self.shared.self_id);
        let request_id = stamped
            .id()
            .expect("stamp() always assigns meta.id")
            .to_string();

        let (tx, rx) = oneshot::channel();
        self.shared.pending.insert(request_id.clone(), tx);

        if let Err(err) = self.shared.transport.publish(stamped).await {
            self.shared.pending.remove(&request_id);
            return Err(ActionFailure::new("handler-error", format!("failed to publish request: {err}")));
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(ReplyOutcome::Value(value))) => Ok(value),
            Ok(Ok(ReplyOutcome::Error(failure))) => Err(failure),
            Ok(Err(_canceled)) => Err(ActionFailure::new("space-closed", "space shut down while awaiting reply")),
            Err(_elapsed) => {
                self.shared.pending.remove(&request_id);
                Err(ActionFailure::new("timeout", format!("request timed out after {timeout:?}")))
            }
        }
    }
}

fn reply_partial(original: &Message, action_name: &str, key: &str, value: Value) -> PartialMessage {
    let parent_id = original.id().unwrap_or_default().to_string();
    PartialMessage::new(original.from.clone(), Action::new(action_name).with_arg(key, value))
        .with_parent_id(parent_id)
}
