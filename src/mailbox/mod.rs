//! Agent inbox: a bounded-or-unbounded FIFO queue of [`Message`](crate::message::Message)s.
//!
//! An agent's inbox is chosen at `Space::add` time via [`crate::space::SpaceConfig`].
//! [`MailboxSenderHandle`]/[`MailboxReceiverHandle`] erase the bounded/
//! unbounded distinction behind one concrete type so the rest of the
//! runtime need not be generic over it.

pub mod bounded;
pub mod traits;
pub mod unbounded;

pub use bounded::{BoundedMailbox, BoundedMailboxSender};
pub use traits::{BackpressureStrategy, MailboxCapacity, MailboxError, TryRecvError};
pub use unbounded::{UnboundedMailbox, UnboundedMailboxSender};

use crate::message::Message;

/// A clonable handle to either mailbox kind's sending half.
#[derive(Clone)]
pub enum MailboxSenderHandle {
    Bounded(BoundedMailboxSender),
    Unbounded(UnboundedMailboxSender),
}

impl MailboxSenderHandle {
    pub async fn send(&self, message: Message) -> Result<(), MailboxError> {
        match self {
            Self::Bounded(sender) => sender.send(message).await,
            Self::Unbounded(sender) => sender.send(message).await,
        }
    }

    pub fn try_send(&self, message: Message) -> Result<(), MailboxError> {
        match self {
            Self::Bounded(sender) => sender.try_send(message),
            Self::Unbounded(sender) => sender.try_send(message),
        }
    }
}

/// The receiving half of either mailbox kind, owned by one agent runtime.
pub enum MailboxReceiverHandle {
    Bounded(BoundedMailbox),
    Unbounded(UnboundedMailbox),
}

impl MailboxReceiverHandle {
    pub async fn recv(&mut self) -> Option<Message> {
        match self {
            Self::Bounded(mailbox) => mailbox.recv().await,
            Self::Unbounded(mailbox) => mailbox.recv().await,
        }
    }

    pub fn try_recv(&mut self) -> Result<Message, TryRecvError> {
        match self {
            Self::Bounded(mailbox) => mailbox.try_recv(),
            Self::Unbounded(mailbox) => mailbox.try_recv(),
        }
    }

    pub fn capacity(&self) -> MailboxCapacity {
        match self {
            Self::Bounded(mailbox) => mailbox.capacity(),
            Self::Unbounded(mailbox) => mailbox.capacity(),
        }
    }
}

/// Builds a sender/receiver pair per the given capacity and strategy.
/// `capacity: None` yields an unbounded mailbox.
pub fn new_mailbox(
    capacity: Option<usize>,
    strategy: BackpressureStrategy,
) -> (MailboxSenderHandle, MailboxReceiverHandle) {
    match capacity {
        Some(cap) => {
            let (tx, rx) = BoundedMailbox::new(cap, strategy);
            (MailboxSenderHandle::Bounded(tx), MailboxReceiverHandle::Bounded(rx))
        }
        None => {
            let (tx, rx) = UnboundedMailbox::new();
            (MailboxSenderHandle::Unbounded(tx), MailboxReceiverHandle::Unbounded(rx))
        }
    }
}
