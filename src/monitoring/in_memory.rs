//! A bounded in-memory [`Monitor`] useful for tests and local development.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use parking_lot::RwLock;

// Layer 3: Internal module imports
use super::events::SpaceEvent;
use super::traits::Monitor;

const DEFAULT_RING_CAPACITY: usize = 256;

/// Retains the most recent `capacity` events in a ring buffer, discarding
/// the oldest once full. Intended for tests and local inspection, not
/// production telemetry (use `tracing` subscribers for that).
pub struct InMemoryMonitor {
    capacity: usize,
    events: RwLock<VecDeque<SpaceEvent>>,
}

impl InMemoryMonitor {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// A snapshot of currently retained events, oldest first.
    pub fn events(&self) -> Vec<SpaceEvent> {
        self.events.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_RING_CAPACITY)
    }
}

#[async_trait]
impl Monitor for InMemoryMonitor {
    async fn record(&self, event: SpaceEvent) {
        let mut events = self.events.write();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn retains_up_to_capacity() {
        let monitor = InMemoryMonitor::new(2);
        monitor.record(SpaceEvent::agent_joined("a".into())).await;
        monitor.record(SpaceEvent::agent_joined("b".into())).await;
        monitor.record(SpaceEvent::agent_joined("c".into())).await;
        assert_eq!(monitor.len(), 2);
    }
}
