//! Per-agent-type action registry: name → (descriptor, handler).

// Layer 1: Standard library imports
use std::collections::BTreeMap;
use std::marker::PhantomData;

// Layer 2: Third-party crate imports
// (none beyond what submodules pull in)

// Layer 3: Internal module imports
use super::descriptor::{help_descriptor, ActionDescriptor};
use super::handler::ActionFn;
use crate::agent::Agent;
use crate::error::RegistryError;
use crate::message::HELP_ACTION;

struct Entry<T: Agent> {
    descriptor: ActionDescriptor,
    handler: Box<dyn ActionFn<T>>,
}

/// The built, immutable set of actions one agent type exposes.
///
/// `help` is always present and is handled directly by the runtime via
/// [`ActionRegistry::introspect`]/[`ActionRegistry::introspect_one`]; it is
/// never stored as a boxed handler entry, and registering an action named
/// `help` fails at construction.
pub struct ActionRegistry<T: Agent> {
    entries: BTreeMap<String, Entry<T>>,
}

impl<T: Agent> ActionRegistry<T> {
    pub fn builder() -> ActionRegistryBuilder<T> {
        ActionRegistryBuilder::new()
    }

    /// Looks up a registered (non-`help`) action's descriptor and handler.
    pub fn get(&self, name: &str) -> Option<(&ActionDescriptor, &dyn ActionFn<T>)> {
        self.entries.get(name).map(|e| (&e.descriptor, e.handler.as_ref()))
    }

    /// The full introspected registry, including the implicit `help` entry.
    pub fn introspect(&self) -> BTreeMap<String, ActionDescriptor> {
        let mut map: BTreeMap<String, ActionDescriptor> = self
            .entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.descriptor.clone()))
            .collect();
        map.insert(HELP_ACTION.to_string(), help_descriptor());
        map
    }

    /// A single action's descriptor, or `None` if unknown (including for an
    /// unrecognized name passed to `help(action_name)`).
    pub fn introspect_one(&self, name: &str) -> Option<ActionDescriptor> {
        if name == HELP_ACTION {
            return Some(help_descriptor());
        }
        self.entries.get(name).map(|e| e.descriptor.clone())
    }
}

/// Builds an [`ActionRegistry`], rejecting duplicate or reserved names.
pub struct ActionRegistryBuilder<T: Agent> {
    entries: BTreeMap<String, Entry<T>>,
    _marker: PhantomData<T>,
}

impl<T: Agent> ActionRegistryBuilder<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            _marker: PhantomData,
        }
    }

    /// Registers one action. Fails if `name` is `help` or already taken.
    pub fn action(
        mut self,
        name: impl Into<String>,
        descriptor: ActionDescriptor,
        handler: impl ActionFn<T> + 'static,
    ) -> Result<Self, RegistryError> {
        let name = name.into();
        if name == HELP_ACTION {
            return Err(RegistryError::ReservedName);
        }
        if self.entries.contains_key(&name) {
            return Err(RegistryError::DuplicateAction(name));
        }
        self.entries.insert(
            name,
            Entry {
                descriptor,
                handler: Box::new(handler),
            },
        );
        Ok(self)
    }

    pub fn build(self) -> ActionRegistry<T> {
        ActionRegistry {
            entries: self.entries,
        }
    }
}

impl<T: Agent> Default for ActionRegistryBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::agent::{Agent, AgentContext};
    use crate::registry::descriptor::ReturnSpec;
    use crate::registry::handler::ActionArgs;
    use async_trait::async_trait;

    struct Dummy;

    #[async_trait]
    impl Agent for Dummy {}

    fn descriptor() -> ActionDescriptor {
        ActionDescriptor::new("does nothing", ReturnSpec::new("null", "nothing"))
    }

    fn noop_handler<'a>(
        _agent: &'a mut Dummy,
        _args: ActionArgs,
        _ctx: &'a mut AgentContext<Dummy>,
    ) -> super::super::handler::ActionFuture<'a> {
        Box::pin(async move { Ok(None) })
    }

    #[test]
    fn duplicate_action_name_fails_at_construction() {
        let result = ActionRegistry::<Dummy>::builder()
            .action("ping", descriptor(), noop_handler)
            .and_then(|b| b.action("ping", descriptor(), noop_handler));
        assert_eq!(result.err(), Some(RegistryError::DuplicateAction("ping".into())));
    }

    #[test]
    fn registering_help_fails_at_construction() {
        let result = ActionRegistry::<Dummy>::builder().action("help", descriptor(), noop_handler);
        assert_eq!(result.err(), Some(RegistryError::ReservedName));
    }

    #[test]
    fn introspect_always_includes_help() {
        let registry = ActionRegistry::<Dummy>::builder()
            .action("ping", descriptor(), noop_handler)
            .expect("registration should succeed")
            .build();
        let index = registry.introspect();
        assert!(index.contains_key("help"));
        assert!(index.contains_key("ping"));
    }
}
