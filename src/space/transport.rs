//! The pluggable delivery mechanism a [`super::Space`] is built on.

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use thiserror::Error;

// Layer 3: Internal module imports
use crate::mailbox::MailboxSenderHandle;
use crate::message::Message;

/// Failures at the transport layer. Distinct from [`crate::error::ActionFailure`]:
/// these never reach the wire as `[error]` messages, they are returned
/// directly from `Space`/context operations or logged and dropped.
#[derive(Debug, Error, Clone)]
pub enum TransportError {
    #[error("agent id `{0}` is already registered in this space")]
    DuplicateId(String),

    #[error("AMQP error: {0}")]
    Amqp(String),

    #[error("transport is shutting down")]
    ShuttingDown,
}

/// Uniform interface the agent runtime and `Space` use to join, leave, and
/// publish messages, independent of whether delivery is in-process or over
/// AMQP. Both implementations must preserve identical externally observable
/// behavior.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Registers `id`'s mailbox sender with the transport so it begins
    /// receiving point-to-point and (if `receive_own_broadcasts`, its own)
    /// broadcast traffic. Fails with `DuplicateId` if `id` is already bound.
    async fn join(
        &self,
        id: String,
        sender: MailboxSenderHandle,
        receive_own_broadcasts: bool,
    ) -> Result<(), TransportError>;

    /// Unregisters `id`; subsequent publishes addressed to it are silently
    /// dropped, matching "no-such-agent" semantics.
    async fn leave(&self, id: &str);

    /// Delivers `message` per addressing rules: to one inbox for
    /// point-to-point, to every current member (modulo own-broadcast
    /// rules) for a broadcast.
    async fn publish(&self, message: Message) -> Result<(), TransportError>;

    /// Releases all transport-owned resources (connections, channels).
    async fn shutdown(&self);
}
