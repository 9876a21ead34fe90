//! `ExternalClient`: a request/response handle for callers that are not
//! themselves agents — CLIs, HTTP gateways, test harnesses.

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;

// Layer 3: Internal module imports
use super::transport::Transport;
use crate::agent::context::ReplyOutcome;
use crate::error::ActionFailure;
use crate::mailbox::new_mailbox;
use crate::message::{stamp, validate_partial, Message, PartialMessage, ERROR_ACTION, RESPONSE_ACTION};

/// A synthetic, handler-less participant joined to a space's transport
/// purely to `send`/`request` messages and observe their replies. Unlike a
/// real agent it never dispatches actions; non-reply deliveries addressed
/// to it are simply dropped.
pub struct ExternalClient {
    id: String,
    transport: Arc<dyn Transport>,
    pending: Arc<DashMap<String, oneshot::Sender<ReplyOutcome>>>,
    receiver_task: tokio::task::JoinHandle<()>,
}

impl ExternalClient {
    pub(super) async fn join(id: String, transport: Arc<dyn Transport>) -> Self {
        let (sender, mut receiver) = new_mailbox(None, Default::default());
        let _ = transport.join(id.clone(), sender, false).await;

        let pending: Arc<DashMap<String, oneshot::Sender<ReplyOutcome>>> = Arc::new(DashMap::new());
        let pending_for_task = pending.clone();
        let receiver_task = tokio::spawn(async move {
            while let Some(msg) = receiver.recv().await {
                route_reply(&pending_for_task, msg);
            }
        });

        Self {
            id,
            transport,
            pending,
            receiver_task,
        }
    }

    /// Stamps, validates, and publishes `partial`, returning its `meta.id`.
    pub async fn send(&self, partial: PartialMessage) -> Result<String, ActionFailure> {
        validate_partial(&partial).map_err(|err| ActionFailure::new("schema-error", err.to_string()))?;
        let stamped = stamp(partial, &self.id);
        let id = stamped.id().unwrap_or_default().to_string();
        if let Err(err) = self.transport.publish(stamped).await {
            tracing::warn!(error = %err, "external client failed to publish message");
        }
        Ok(id)
    }

    /// Sends `partial`, then awaits its correlated `[response]`/`[error]` or
    /// `timeout`.
    pub async fn request(&self, partial: PartialMessage, timeout: Duration) -> Result<Value, ActionFailure> {
        validate_partial(&partial).map_err(|err| ActionFailure::new("schema-error", err.to_string()))?;
        let stamped = stamp(partial, &self.id);
        let request_id = stamped.id().unwrap_or_default().to_string();

        let (tx, rx) = oneshot::channel();
        self.pending.insert(request_id.clone(), tx);

        if let Err(err) = self.transport.publish(stamped).await {
            self.pending.remove(&request_id);
            return Err(ActionFailure::new("handler-error", format!("failed to publish request: {err}")));
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(ReplyOutcome::Value(value))) => Ok(value),
            Ok(Ok(ReplyOutcome::Error(failure))) => Err(failure),
            Ok(Err(_canceled)) => Err(ActionFailure::new("space-closed", "space shut down while awaiting reply")),
            Err(_elapsed) => {
                self.pending.remove(&request_id);
                Err(ActionFailure::new("timeout", format!("request timed out after {timeout:?}")))
            }
        }
    }

    /// Leaves the transport and stops the background reply router.
    pub async fn close(self) {
        self.receiver_task.abort();
        self.transport.leave(&self.id).await;
    }
}

fn route_reply(pending: &DashMap<String, oneshot::Sender<ReplyOutcome>>, msg: Message) {
    let Some(parent_id) = msg.parent_id().map(str::to_string) else {
        return;
    };
    let is_error = msg.action.name == ERROR_ACTION;
    if msg.action.name != RESPONSE_ACTION && !is_error {
        return;
    }
    let outcome = if is_error {
        let error_type = msg
            .action
            .args
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("handler-error")
            .to_string();
        let message = msg
            .action
            .args
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        ReplyOutcome::Error(ActionFailure::new(error_type, message))
    } else {
        ReplyOutcome::Value(msg.action.args.get("value").cloned().unwrap_or(Value::Null))
    };
    if let Some((_, waiter)) = pending.remove(&parent_id) {
        let _ = waiter.send(outcome);
    }
}
