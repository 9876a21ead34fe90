//! Send-time schema validation.

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use super::types::PartialMessage;

/// A send-time schema validation failure. Raised locally; the offending
/// message never leaves the sender.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("message `to` must be a non-empty string")]
    MissingTo,

    #[error("action name must be a non-empty string")]
    MissingActionName,
}

/// Validates a partial message before it is stamped and published.
pub fn validate_partial(partial: &PartialMessage) -> Result<(), SchemaError> {
    if partial.to.trim().is_empty() {
        return Err(SchemaError::MissingTo);
    }
    if partial.action.name.trim().is_empty() {
        return Err(SchemaError::MissingActionName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::types::Action;

    #[test]
    fn rejects_empty_to() {
        let partial = PartialMessage::new("", Action::new("ping"));
        assert_eq!(validate_partial(&partial), Err(SchemaError::MissingTo));
    }

    #[test]
    fn rejects_empty_action_name() {
        let partial = PartialMessage::new("agent-b", Action::new(""));
        assert_eq!(
            validate_partial(&partial),
            Err(SchemaError::MissingActionName)
        );
    }

    #[test]
    fn accepts_well_formed_partial() {
        let partial = PartialMessage::new("agent-b", Action::new("ping"));
        assert!(validate_partial(&partial).is_ok());
    }
}
