//! Mailbox capacity and error types shared by the bounded and unbounded
//! implementations.

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Whether a mailbox has a fixed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxCapacity {
    Bounded(usize),
    Unbounded,
}

/// How a bounded mailbox behaves when full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackpressureStrategy {
    /// Wait for space to become available.
    #[default]
    Block,
    /// Drop the message being sent and return `Ok(())`.
    Drop,
    /// Return `MailboxError::Full` immediately.
    Error,
}

/// Failure sending to a mailbox.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailboxError {
    #[error("mailbox is full")]
    Full,
    #[error("mailbox is closed")]
    Closed,
}

/// Failure polling a mailbox without blocking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TryRecvError {
    #[error("mailbox is empty")]
    Empty,
    #[error("mailbox is closed")]
    Closed,
}
