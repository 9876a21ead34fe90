//! The `Monitor` trait: a sink for [`SpaceEvent`](super::events::SpaceEvent)s.

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::events::SpaceEvent;

/// Severity of a recorded [`SpaceEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSeverity {
    Debug,
    Info,
    Warning,
    Error,
}

/// A sink for space-lifecycle and dispatch events.
///
/// Object-safe over one concrete event type: this crate has a single
/// unified event taxonomy rather than per-subsystem event types, so no
/// generic parameter is needed to keep `Arc<dyn Monitor>` usable.
#[async_trait]
pub trait Monitor: Send + Sync {
    async fn record(&self, event: SpaceEvent);
}
