//! Declarative action metadata: the shape returned by `help`.

// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// An action's access classification.
///
/// The gate is informational only: it records no state beyond what is
/// declared here, and policy changes require re-registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AccessPolicy {
    #[default]
    Permitted,
    Denied,
    RequiresConfirmation,
}

/// Declared shape of one argument.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArgSpec {
    pub type_name: String,
    pub description: String,
}

impl ArgSpec {
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
        }
    }
}

/// Declared shape of a handler's return value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReturnSpec {
    pub type_name: String,
    pub description: String,
}

impl ReturnSpec {
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
        }
    }
}

/// Full declarative metadata for one registered action. Type information
/// here is descriptive, not enforced by the core at dispatch; argument
/// binding uses names at invocation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub description: String,
    pub args: BTreeMap<String, ArgSpec>,
    pub returns: ReturnSpec,
    pub access_policy: AccessPolicy,
}

impl ActionDescriptor {
    pub fn new(description: impl Into<String>, returns: ReturnSpec) -> Self {
        Self {
            description: description.into(),
            args: BTreeMap::new(),
            returns,
            access_policy: AccessPolicy::Permitted,
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, spec: ArgSpec) -> Self {
        self.args.insert(name.into(), spec);
        self
    }

    pub fn with_access_policy(mut self, policy: AccessPolicy) -> Self {
        self.access_policy = policy;
        self
    }
}

/// The descriptor for the implicit, always-present `help` action.
pub(super) fn help_descriptor() -> ActionDescriptor {
    ActionDescriptor::new(
        "Describe this agent's registered actions.",
        ReturnSpec::new("object", "Action name to descriptor, or a single descriptor."),
    )
    .with_arg(
        "action_name",
        ArgSpec::new("string", "If given, return only this action's entry."),
    )
}
