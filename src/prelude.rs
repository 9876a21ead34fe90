//! Convenient imports for building agents and spaces.
//!
//! ```rust
//! use agentspace::prelude::*;
//! ```

// Agent runtime
pub use crate::agent::{ActionOutcome, Agent, AgentContext, AgentState};

// Messaging
pub use crate::message::{stamp, Action, Message, PartialMessage};

// Action registry
pub use crate::registry::{
    AccessPolicy, ActionArgs, ActionDescriptor, ActionRegistry, ArgSpec, ReturnSpec,
};

// Mailbox
pub use crate::mailbox::{BackpressureStrategy, MailboxCapacity};

// Space and transport
pub use crate::space::{AmqpConfig, ExternalClient, LocalTransport, Space, SpaceConfig, Transport};

// Monitoring
pub use crate::monitoring::{EventSeverity, InMemoryMonitor, Monitor, NoopMonitor, SpaceEvent};

// Errors
pub use crate::error::ActionFailure;

// Utilities
pub use crate::util::{MessageId, BROADCAST};
