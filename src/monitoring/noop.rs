//! A zero-overhead [`Monitor`] that discards every event.

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::events::SpaceEvent;
use super::traits::Monitor;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

#[async_trait]
impl Monitor for NoopMonitor {
    #[inline(always)]
    async fn record(&self, _event: SpaceEvent) {}
}
