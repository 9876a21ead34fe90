//! Concrete event types recorded by a [`super::Monitor`].

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::traits::EventSeverity;

/// One occurrence worth observing in a space: an agent joining/leaving, a
/// message being routed or dropped, or an action being invoked or denied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceEvent {
    pub timestamp: DateTime<Utc>,
    pub severity: EventSeverity,
    pub kind: SpaceEventKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpaceEventKind {
    AgentJoined { agent_id: String },
    AgentLeft { agent_id: String },
    MessageDropped { to: String, reason: String },
    ActionInvoked { agent_id: String, action: String, succeeded: bool },
    AccessDenied { agent_id: String, action: String },
}

impl SpaceEvent {
    fn at(severity: EventSeverity, kind: SpaceEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            kind,
        }
    }

    pub fn agent_joined(agent_id: String) -> Self {
        Self::at(EventSeverity::Info, SpaceEventKind::AgentJoined { agent_id })
    }

    pub fn agent_left(agent_id: String) -> Self {
        Self::at(EventSeverity::Info, SpaceEventKind::AgentLeft { agent_id })
    }

    pub fn message_dropped(to: String, reason: String) -> Self {
        Self::at(EventSeverity::Warning, SpaceEventKind::MessageDropped { to, reason })
    }

    pub fn action_invoked(agent_id: String, action: String, succeeded: bool) -> Self {
        let severity = if succeeded { EventSeverity::Debug } else { EventSeverity::Warning };
        Self::at(severity, SpaceEventKind::ActionInvoked { agent_id, action, succeeded })
    }

    pub fn access_denied(agent_id: String, action: String) -> Self {
        Self::at(EventSeverity::Warning, SpaceEventKind::AccessDenied { agent_id, action })
    }
}
