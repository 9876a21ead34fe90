//! # agentspace - Dynamic Actor-Model Messaging Substrate
//!
//! Agents exchange named, schema-validated messages through a shared
//! `Space`. Unlike a typed actor framework, an agent's set of actions is a
//! runtime registry rather than a compile-time enum: agents discover each
//! other's capabilities through the built-in `help` action, and any agent
//! can call any other agent's named action by string, with arguments bound
//! by name from a JSON-shaped argument map.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use agentspace::prelude::*;
//! use async_trait::async_trait;
//!
//! struct Calculator;
//!
//! #[async_trait]
//! impl Agent for Calculator {}
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ActionRegistry::<Calculator>::builder()
//!         .action(
//!             "add",
//!             ActionDescriptor::new("adds two numbers", ReturnSpec::new("number", "the sum"))
//!                 .with_arg("a", ArgSpec::new("number", "left operand"))
//!                 .with_arg("b", ArgSpec::new("number", "right operand")),
//!             |_agent, args, ctx| {
//!                 Box::pin(async move {
//!                     let a: f64 = args.get("a")?;
//!                     let b: f64 = args.get("b")?;
//!                     ctx.respond_with(serde_json::json!(a + b)).await?;
//!                     Ok(None)
//!                 })
//!             },
//!         )?
//!         .build();
//!
//!     let space = Space::local();
//!     space.add("calculator", Calculator, registry).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! ## Messaging
//! - [`message`] - The wire envelope (`Message`, `PartialMessage`, `Action`) and send-time validation
//! - [`registry`] - Action descriptors, argument binding, and the per-agent-type `ActionRegistry`
//!
//! ## Runtime
//! - [`agent`] - The `Agent` trait, its lifecycle, execution context, and dispatch loop
//! - [`space`] - `Space`, its pluggable `Transport` (local or AMQP), and configuration
//! - [`mailbox`] - Per-agent inbox queuing with backpressure control
//!
//! ## Observability
//! - [`monitoring`] - Event tracking for joins, leaves, dispatch outcomes, and access decisions
//! - [`error`] - The structured error taxonomy carried on the wire and off it
//!
//! ## Infrastructure
//! - [`util`] - Identifiers (`MessageId`) and addressing constants (`BROADCAST`)
//!
//! # Architecture Principles
//!
//! - **Schema over types.** A `Message`'s shape is validated at send time
//!   (`meta`, `to`, `action.name`), not encoded in the Rust type system -
//!   this crate trades compile-time message-shape checking for runtime
//!   agent interoperability across dynamically-discovered action sets.
//! - **One dynamic-dispatch seam.** `ActionRegistry<T>` is the only place
//!   `Box<dyn ...>` appears in the hot path; everything else (`Agent`,
//!   `Transport`, `Monitor`) is implemented by concrete named types behind
//!   `Arc<dyn Trait>` at the handful of places that need runtime
//!   polymorphism between a local and an AMQP-backed space.
//! - **Transport equivalence.** `LocalTransport` and `AmqpTransport`
//!   preserve identical externally observable delivery semantics; an agent
//!   never knows which one it's running under.
//! - **`from` forgery is impossible, not merely checked.** `PartialMessage`
//!   carries no `from` field at all; only `stamp` (invoked by the runtime)
//!   assigns it.

pub mod agent;
pub mod error;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod prelude;
pub mod registry;
pub mod space;
pub mod telemetry;
pub mod util;

pub use agent::{Agent, AgentContext, AgentState, AgentRuntime};
pub use error::{ActionFailure, RegistryError, SpaceError};
pub use mailbox::{BackpressureStrategy, MailboxCapacity, MailboxError};
pub use message::{stamp, Action, Message, PartialMessage};
pub use monitoring::{EventSeverity, InMemoryMonitor, Monitor, NoopMonitor, SpaceEvent};
pub use registry::{AccessPolicy, ActionDescriptor, ActionRegistry, ArgSpec, ReturnSpec};
pub use space::{AmqpConfig, ExternalClient, LocalTransport, Space, SpaceConfig, Transport, TransportError};
pub use util::{is_broadcast, MessageId, BROADCAST};
