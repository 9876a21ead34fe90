//! Action registry & introspector: per-agent-type discovery mapping
//! action name to a handler, its declared argument/return shape, and its
//! access policy.

pub mod descriptor;
pub mod handler;
pub mod registry;

pub use descriptor::{AccessPolicy, ActionDescriptor, ArgSpec, ReturnSpec};
pub use handler::{ActionArgs, ActionFn, ActionFuture};
pub use registry::{ActionRegistry, ActionRegistryBuilder};
