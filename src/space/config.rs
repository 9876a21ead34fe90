//! Space and AMQP transport configuration.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::mailbox::BackpressureStrategy;

const DEFAULT_AMQP_HOST: &str = "localhost";
const DEFAULT_AMQP_PORT: u16 = 5672;
const DEFAULT_AMQP_USERNAME: &str = "guest";
const DEFAULT_AMQP_PASSWORD: &str = "guest";
const DEFAULT_AMQP_VHOST: &str = "/";
const DEFAULT_HEARTBEAT_SECS: u16 = 60;
const DEFAULT_RECONNECT_INITIAL_BACKOFF: Duration = Duration::from_millis(200);
const DEFAULT_RECONNECT_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Per-agent mailbox and request-timeout defaults for a [`super::Space`].
#[derive(Debug, Clone)]
pub struct SpaceConfig {
    /// `None` means every agent gets an unbounded inbox unless it overrides
    /// this per-agent at `add` time.
    pub default_mailbox_capacity: Option<usize>,
    pub default_backpressure: BackpressureStrategy,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            default_mailbox_capacity: None,
            default_backpressure: BackpressureStrategy::default(),
        }
    }
}

impl SpaceConfig {
    pub fn builder() -> SpaceConfigBuilder {
        SpaceConfigBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpaceConfigBuilder {
    config: SpaceConfig,
}

impl SpaceConfigBuilder {
    pub fn mailbox_capacity(mut self, capacity: usize) -> Self {
        self.config.default_mailbox_capacity = Some(capacity);
        self
    }

    pub fn unbounded_mailboxes(mut self) -> Self {
        self.config.default_mailbox_capacity = None;
        self
    }

    pub fn backpressure(mut self, strategy: BackpressureStrategy) -> Self {
        self.config.default_backpressure = strategy;
        self
    }

    pub fn build(self) -> SpaceConfig {
        self.config
    }
}

/// AMQP transport settings. Defaults are overridable via the
/// `AMQP_HOST`/`AMQP_PORT`/`AMQP_USERNAME`/`AMQP_PASSWORD`/`AMQP_VHOST`
/// environment variables.
#[derive(Debug, Clone)]
pub struct AmqpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub vhost: String,
    /// Exchange name; also used to derive each agent's queue name.
    pub space_name: String,
    pub heartbeat_secs: u16,
    pub reconnect_initial_backoff: Duration,
    pub reconnect_max_backoff: Duration,
}

impl AmqpConfig {
    /// Builds a config from `space_name` plus environment overrides.
    pub fn from_env(space_name: impl Into<String>) -> Self {
        Self {
            host: std::env::var("AMQP_HOST").unwrap_or_else(|_| DEFAULT_AMQP_HOST.to_string()),
            port: std::env::var("AMQP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_AMQP_PORT),
            username: std::env::var("AMQP_USERNAME").unwrap_or_else(|_| DEFAULT_AMQP_USERNAME.to_string()),
            password: std::env::var("AMQP_PASSWORD").unwrap_or_else(|_| DEFAULT_AMQP_PASSWORD.to_string()),
            vhost: std::env::var("AMQP_VHOST").unwrap_or_else(|_| DEFAULT_AMQP_VHOST.to_string()),
            space_name: space_name.into(),
            heartbeat_secs: DEFAULT_HEARTBEAT_SECS,
            reconnect_initial_backoff: DEFAULT_RECONNECT_INITIAL_BACKOFF,
            reconnect_max_backoff: DEFAULT_RECONNECT_MAX_BACKOFF,
        }
    }

    /// The AMQP URI assembled from `host`/`port`/`username`/`password`/
    /// `vhost`/`heartbeat_secs`. The `heartbeat` query parameter is read by
    /// `lapin`'s URI parsing and negotiated with the broker at connect time.
    pub fn amqp_uri(&self) -> String {
        format!(
            "amqp://{}:{}@{}:{}/{}?heartbeat={}",
            self.username,
            self.password,
            self.host,
            self.port,
            self.vhost.trim_start_matches('/'),
            self.heartbeat_secs
        )
    }

    pub fn with_heartbeat_secs(mut self, secs: u16) -> Self {
        self.heartbeat_secs = secs;
        self
    }

    pub fn with_reconnect_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.reconnect_initial_backoff = initial;
        self.reconnect_max_backoff = max;
        self
    }
}
