//! Unbounded mailbox: unlimited capacity, no backpressure.
//!
//! Suitable for agents that must never block a publisher, at the cost of
//! unbounded memory growth if a consumer falls behind. Prefer
//! [`super::bounded::BoundedMailbox`] unless that tradeoff is understood.

// Layer 2: Third-party crate imports
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::traits::{MailboxCapacity, MailboxError, TryRecvError};
use crate::message::Message;

#[derive(Clone)]
pub struct UnboundedMailboxSender {
    inner: mpsc::UnboundedSender<Message>,
}

impl UnboundedMailboxSender {
    pub async fn send(&self, message: Message) -> Result<(), MailboxError> {
        self.try_send(message)
    }

    pub fn try_send(&self, message: Message) -> Result<(), MailboxError> {
        self.inner.send(message).map_err(|_| MailboxError::Closed)
    }
}

pub struct UnboundedMailbox {
    inner: mpsc::UnboundedReceiver<Message>,
}

impl UnboundedMailbox {
    pub fn new() -> (UnboundedMailboxSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (UnboundedMailboxSender { inner: tx }, Self { inner: rx })
    }

    pub async fn recv(&mut self) -> Option<Message> {
        self.inner.recv().await
    }

    pub fn try_recv(&mut self) -> Result<Message, TryRecvError> {
        self.inner.try_recv().map_err(|err| match err {
            mpsc::error::TryRecvError::Empty => TryRecvError::Empty,
            mpsc::error::TryRecvError::Disconnected => TryRecvError::Closed,
        })
    }

    pub fn capacity(&self) -> MailboxCapacity {
        MailboxCapacity::Unbounded
    }
}
