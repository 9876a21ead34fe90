//! `Space`: the public entry point that owns agents and wires them to a
//! shared [`Transport`].

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;

// Layer 3: Internal module imports
use super::amqp::AmqpTransport;
use super::client::ExternalClient;
use super::config::{AmqpConfig, SpaceConfig};
use super::local::LocalTransport;
use super::transport::{Transport, TransportError};
use crate::agent::{Agent, AgentRuntime, AgentState};
use crate::error::SpaceError;
use crate::mailbox::new_mailbox;
use crate::monitoring::{Monitor, NoopMonitor};
use crate::registry::ActionRegistry;

/// Owns a group of agents sharing one [`Transport`] and one
/// [`Monitor`](crate::monitoring::Monitor). Cloning a `Space` shares the
/// same underlying state; it is the unit of lifecycle management.
#[derive(Clone)]
pub struct Space {
    transport: Arc<dyn Transport>,
    monitor: Arc<dyn Monitor>,
    config: SpaceConfig,
    states: Arc<DashMap<String, Arc<RwLock<AgentState>>>>,
    shutdown_senders: Arc<DashMap<String, watch::Sender<bool>>>,
    handles: Arc<DashMap<String, JoinHandle<()>>>,
}

impl Space {
    /// A space backed by [`LocalTransport`]: in-process, no serialization.
    pub fn local() -> Self {
        Self::local_with_config(SpaceConfig::default())
    }

    pub fn local_with_config(config: SpaceConfig) -> Self {
        Self::new(Arc::new(LocalTransport::new()), config)
    }

    /// A space backed by [`AmqpTransport`], connecting eagerly.
    pub async fn amqp(amqp_config: AmqpConfig) -> Result<Self, TransportError> {
        Self::amqp_with_config(amqp_config, SpaceConfig::default()).await
    }

    pub async fn amqp_with_config(
        amqp_config: AmqpConfig,
        config: SpaceConfig,
    ) -> Result<Self, TransportError> {
        let transport = AmqpTransport::connect(amqp_config).await?;
        Ok(Self::new(transport, config))
    }

    fn new(transport: Arc<dyn Transport>, config: SpaceConfig) -> Self {
        Self {
            transport,
            monitor: Arc::new(NoopMonitor),
            config,
            states: Arc::new(DashMap::new()),
            shutdown_senders: Arc::new(DashMap::new()),
            handles: Arc::new(DashMap::new()),
        }
    }

    /// Replaces the default no-op monitor with `monitor`.
    pub fn with_monitor(mut self, monitor: Arc<dyn Monitor>) -> Self {
        self.monitor = monitor;
        self
    }

    /// Joins `agent` under `id`, spawning its dispatch loop on its own
    /// `tokio` task. Fails if `id` is already registered.
    pub async fn add<T: Agent>(
        &self,
        id: impl Into<String>,
        agent: T,
        registry: ActionRegistry<T>,
    ) -> Result<(), SpaceError> {
        let id = id.into();
        if self.states.contains_key(&id) {
            return Err(SpaceError::DuplicateAgentId(id));
        }

        let (sender, receiver) = new_mailbox(
            self.config.default_mailbox_capacity,
            self.config.default_backpressure,
        );
        self.transport
            .join(id.clone(), sender, agent.receive_own_broadcasts())
            .await?;

        let state = Arc::new(RwLock::new(AgentState::New));
        let pending = Arc::new(dashmap::DashMap::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let runtime = AgentRuntime::new(
            id.clone(),
            agent,
            registry,
            receiver,
            self.transport.clone(),
            state.clone(),
            pending,
            shutdown_rx,
            self.monitor.clone(),
        );

        self.states.insert(id.clone(), state);
        self.shutdown_senders.insert(id.clone(), shutdown_tx);
        self.monitor
            .record(crate::monitoring::SpaceEvent::agent_joined(id.clone()))
            .await;

        let handle = tokio::spawn(runtime.run());
        self.handles.insert(id, handle);
        Ok(())
    }

    /// Signals `id`'s runtime to stop, waits for it to finish its
    /// shutdown sequence, and removes it from the transport.
    pub async fn remove(&self, id: &str) -> Result<(), SpaceError> {
        let Some((_, shutdown_tx)) = self.shutdown_senders.remove(id) else {
            return Ok(());
        };
        let _ = shutdown_tx.send(true);
        if let Some((_, handle)) = self.handles.remove(id) {
            let _ = handle.await;
        }
        self.states.remove(id);
        self.transport.leave(id).await;
        self.monitor
            .record(crate::monitoring::SpaceEvent::agent_left(id.to_string()))
            .await;
        Ok(())
    }

    /// Stops every agent and releases the transport's resources.
    pub async fn shutdown(&self) {
        let ids: Vec<String> = self.shutdown_senders.iter().map(|e| e.key().clone()).collect();
        for id in ids {
            let _ = self.remove(&id).await;
        }
        self.transport.shutdown().await;
    }

    /// The current lifecycle state of `id`, or `None` if unknown.
    pub fn state_of(&self, id: &str) -> Option<AgentState> {
        self.states.get(id).map(|state| *state.read())
    }

    /// Joins a handler-less [`ExternalClient`] under `id`, for callers that
    /// are not themselves agents (CLIs, gateways, test harnesses) but need
    /// to `send`/`request` into the space.
    pub async fn external_client(&self, id: impl Into<String>) -> ExternalClient {
        ExternalClient::join(id.into(), self.transport.clone()).await
    }
}
