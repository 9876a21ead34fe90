//! Fixed-capacity mailbox with configurable backpressure.

// Layer 2: Third-party crate imports
use tokio::sync::mpsc;

// Layer 3: Internal module imports
use super::traits::{BackpressureStrategy, MailboxCapacity, MailboxError, TryRecvError};
use crate::message::Message;

/// Sending half of a bounded mailbox.
#[derive(Clone)]
pub struct BoundedMailboxSender {
    inner: mpsc::Sender<Message>,
    strategy: BackpressureStrategy,
}

impl BoundedMailboxSender {
    pub async fn send(&self, message: Message) -> Result<(), MailboxError> {
        match self.strategy {
            BackpressureStrategy::Block => {
                self.inner.send(message).await.map_err(|_| MailboxError::Closed)
            }
            BackpressureStrategy::Drop => match self.inner.try_send(message) {
                Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => Ok(()),
                Err(mpsc::error::TrySendError::Closed(_)) => Err(MailboxError::Closed),
            },
            BackpressureStrategy::Error => self.try_send(message),
        }
    }

    pub fn try_send(&self, message: Message) -> Result<(), MailboxError> {
        self.inner.try_send(message).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => MailboxError::Full,
            mpsc::error::TrySendError::Closed(_) => MailboxError::Closed,
        })
    }
}

/// Receiving half of a bounded mailbox. Owned exclusively by one agent
/// runtime; not cloneable.
pub struct BoundedMailbox {
    inner: mpsc::Receiver<Message>,
    capacity: usize,
}

impl BoundedMailbox {
    pub fn new(capacity: usize, strategy: BackpressureStrategy) -> (BoundedMailboxSender, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            BoundedMailboxSender { inner: tx, strategy },
            Self { inner: rx, capacity },
        )
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
        MailboxCapacity::Bounded(self.capacity)
    }
}
