//! Monitoring: a sink for space lifecycle and dispatch events.
//!
//! Distinct from `tracing`-based logging (which every layer emits
//! unconditionally): a [`Monitor`] is an optional, queryable record of
//! the same occurrences, with a ring-buffered and a no-op implementation
//! provided out of the box.

pub mod events;
pub mod in_memory;
pub mod noop;
pub mod traits;

pub use events::{SpaceEvent, SpaceEventKind};
pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::{EventSeverity, Monitor};
