//! The per-agent worker: dequeues its inbox and drives an agent's lifecycle
//! from join through message dispatch to removal.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::{oneshot, watch};

// Layer 3: Internal module imports
use super::context::{AgentContext, ContextShared, ReplyOutcome};
use super::lifecycle::AgentState;
use super::traits::{ActionOutcome, Agent};
use crate::error::ActionFailure;
use crate::mailbox::MailboxReceiverHandle;
use crate::message::{
    stamp, Action, Message, PartialMessage, ERROR_ACTION, HELP_ACTION, RESPONSE_ACTION,
};
use crate::monitoring::{Monitor, SpaceEvent};
use crate::registry::ActionRegistry;
use crate::space::transport::Transport;

/// Owns one agent's inbox and runs its dispatch loop on its own `tokio`
/// task. Never constructed directly by agent code; spawned by `Space::add`.
pub struct AgentRuntime<T: Agent> {
    id: String,
    agent: T,
    registry: ActionRegistry<T>,
    receiver: MailboxReceiverHandle,
    transport: Arc<dyn Transport>,
    state: Arc<RwLock<AgentState>>,
    pending: Arc<DashMap<String, oneshot::Sender<ReplyOutcome>>>,
    shutdown: watch::Receiver<bool>,
    monitor: Arc<dyn Monitor>,
}

impl<T: Agent> AgentRuntime<T> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        agent: T,
        registry: ActionRegistry<T>,
        receiver: MailboxReceiverHandle,
        transport: Arc<dyn Transport>,
        state: Arc<RwLock<AgentState>>,
        pending: Arc<DashMap<String, oneshot::Sender<ReplyOutcome>>>,
        shutdown: watch::Receiver<bool>,
        monitor: Arc<dyn Monitor>,
    ) -> Self {
        Self {
            id,
            agent,
            registry,
            receiver,
            transport,
            state,
            pending,
            shutdown,
            monitor,
        }
    }

    fn shared(&self) -> ContextShared {
        ContextShared {
            self_id: self.id.clone(),
            transport: self.transport.clone(),
            pending: self.pending.clone(),
        }
    }

    pub async fn run(mut self) {
        let shared = self.shared();
        let mut join_ctx = AgentContext::new(shared, None, false);
        self.agent.after_add(&mut join_ctx).await;
        *self.state.write() = AgentState::Running;
        tracing::debug!(agent_id = %self.id, "agent runtime started");

        loop {
            tokio::select! {
                biased;
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        break;
                    }
                }
                maybe_msg = self.receiver.recv() => {
                    match maybe_msg {
                        Some(msg) => self.handle_one(msg).await,
                        None => break,
                    }
                }
            }
        }

        *self.state.write() = AgentState::Stopping;
        self.cancel_pending("space-closed", "space shut down while awaiting reply");
        let shared = self.shared();
        let mut leave_ctx = AgentContext::new(shared, None, false);
        self.agent.before_remove(&mut leave_ctx).await;
        *self.state.write() = AgentState::Stopped;
        tracing::debug!(agent_id = %self.id, "agent runtime stopped");
    }

    fn cancel_pending(&self, error_type: &str, message: &str) {
        let keys: Vec<String> = self.pending.iter().map(|e| e.key().clone()).collect();
        for key in keys {
            if let Some((_, waiter)) = self.pending.remove(&key) {
                let _ = waiter.send(ReplyOutcome::Error(ActionFailure::new(error_type, message)));
            }
        }
    }

    async fn handle_one(&mut self, msg: Message) {
        let action_name = msg.action.name.clone();

        if action_name == RESPONSE_ACTION || action_name == ERROR_ACTION {
            self.route_reply(msg).await;
            return;
        }

        let is_broadcast = msg.is_broadcast();
        let is_help = action_name == HELP_ACTION;

        // `help` is always registered with a fixed `Permitted` policy (see
        // `registry::descriptor::help_descriptor`), so it always clears this
        // gate; only a real registry lookup is needed for anything else.
        if !is_help {
            let Some((descriptor, _)) = self.registry.get(&action_name) else {
                if !is_broadcast {
                    self.reply_error(&msg, "no-such-action", format!("agent has no action named `{action_name}`")).await;
                } else {
                    self.monitor.record(SpaceEvent::message_dropped(msg.to.clone(), "no-such-action (broadcast)".into())).await;
                }
                return;
            };
            let descriptor = descriptor.clone();

            use crate::registry::AccessPolicy;
            match descriptor.access_policy {
                AccessPolicy::Denied => {
                    self.monitor.record(SpaceEvent::access_denied(self.id.clone(), action_name.clone())).await;
                    self.reply_error(&msg, "access-denied", "action is denied".to_string()).await;
                    return;
                }
                AccessPolicy::RequiresConfirmation => match self.agent.request_permission(&msg).await {
                    Ok(true) => {}
                    Ok(false) => {
                        self.monitor.record(SpaceEvent::access_denied(self.id.clone(), action_name.clone())).await;
                        self.reply_error(&msg, "access-denied", "permission denied".to_string()).await;
                        return;
                    }
                    Err(failure) => {
                        self.reply_error(&msg, "callback-error", failure.message).await;
                        return;
                    }
                },
                AccessPolicy::Permitted => {}
            }
        }

        if let Err(failure) = self.agent.before_action(&msg).await {
            self.reply_error(&msg, "callback-error", failure.message).await;
            return;
        }

        let (handler_result, already_responded) = if is_help {
            (Ok(self.compute_help_value(&msg)), false)
        } else {
            let args = crate::registry::ActionArgs::from_map(msg.action.args.clone());
            let shared = self.shared();
            let mut ctx = AgentContext::new(shared, Some(msg.clone()), true);
            let result = {
                let (_, handler) = self
                    .registry
                    .get(&action_name)
                    .expect("action resolved above must still be present");
                handler.call(&mut self.agent, args, &mut ctx).await
            };
            (result, ctx.did_respond())
        };

        let outcome = match &handler_result {
            Ok(value) => ActionOutcome::Value(value.clone()),
            Err(failure) => ActionOutcome::Error(failure.clone()),
        };
        self.agent.after_action(&msg, &outcome).await;

        self.monitor
            .record(SpaceEvent::action_invoked(
                self.id.clone(),
                action_name.clone(),
                matches!(outcome, ActionOutcome::Value(_)),
            ))
            .await;

        match handler_result {
            Ok(value) => {
                if !already_responded {
                    if let Some(v) = value {
                        self.reply_value(&msg, v).await;
                    }
                }
            }
            Err(failure) => {
                self.reply_error(&msg, &failure.error_type, failure.message).await;
            }
        }
    }

    async fn route_reply(&mut self, msg: Message) {
        let Some(parent_id) = msg.parent_id().map(|s| s.to_string()) else {
            return;
        };
        let is_error = msg.action.name == ERROR_ACTION;
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
            let value = msg.action.args.get("value").cloned().unwrap_or(Value::Null);
            ReplyOutcome::Value(value)
        };

        if let Some((_, waiter)) = self.pending.remove(&parent_id) {
            let _ = waiter.send(outcome);
            return;
        }

        match outcome {
            ReplyOutcome::Value(value) => self.agent.handle_action_value(value, &msg).await,
            ReplyOutcome::Error(failure) => self.agent.handle_action_error(&failure, &msg).await,
        }
    }

    fn compute_help_value(&self, msg: &Message) -> Option<Value> {
        let requested_name = msg
            .action
            .args
            .get("action_name")
            .and_then(Value::as_str)
            .map(str::to_string);

        let value = match requested_name {
            None => serde_json::to_value(self.registry.introspect()).unwrap_or(Value::Object(Default::default())),
            Some(name) => match self.registry.introspect_one(&name) {
                Some(descriptor) => serde_json::to_value(descriptor).unwrap_or(Value::Null),
                None => Value::Object(Default::default()),
            },
        };
        Some(value)
    }

    async fn reply_value(&mut self, original: &Message, value: Value) {
        let parent_id = original.id().unwrap_or_default().to_string();
        let partial = PartialMessage::new(original.from.clone(), Action::new(RESPONSE_ACTION).with_arg("value", value))
            .with_parent_id(parent_id);
        self.publish_reply(partial).await;
    }

    async fn reply_error(&mut self, original: &Message, error_type: &str, message: String) {
        let parent_id = original.id().unwrap_or_default().to_string();
        let action = Action::new(ERROR_ACTION)
            .with_arg("type", error_type)
            .with_arg("message", message);
        let partial = PartialMessage::new(original.from.clone(), action).with_parent_id(parent_id);
        self.publish_reply(partial).await;
    }

    async fn publish_reply(&self, partial: PartialMessage) {
        let stamped = stamp(partial, &self.id);
        if let Err(err) = self.transport.publish(stamped).await {
            tracing::warn!(error = %err, agent_id = %self.id, "failed to deliver reply");
        }
    }
}
