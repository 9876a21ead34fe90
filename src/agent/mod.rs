//! Agent runtime: the `Agent` trait, its lifecycle state machine,
//! the per-message execution context, and the worker that drives both.

pub mod context;
pub mod lifecycle;
pub mod runtime;
pub mod traits;

pub use context::AgentContext;
pub use lifecycle::AgentState;
pub use runtime::AgentRuntime;
pub use traits::{ActionOutcome, Agent};
