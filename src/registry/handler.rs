//! The per-action handler type and argument binding.

// Layer 1: Standard library imports
use std::future::Future;
use std::pin::Pin;

// Layer 2: Third-party crate imports
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

// Layer 3: Internal module imports
use crate::agent::{Agent, AgentContext};
use crate::error::ActionFailure;

/// A boxed, possibly-borrowing future, as returned by an [`ActionFn`].
pub type ActionFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<Value>, ActionFailure>> + Send + 'a>>;

/// A handler's bound arguments, looked up and deserialized by name.
///
/// Binding a missing required argument, or one of the wrong shape, fails
/// with a `bad-arguments` [`ActionFailure`].
#[derive(Debug, Clone)]
pub struct ActionArgs(Map<String, Value>);

impl ActionArgs {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Binds a required argument by name.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, ActionFailure> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| ActionFailure::bad_arguments(format!("missing required argument `{name}`")))?;
        serde_json::from_value(value.clone()).map_err(|err| {
            ActionFailure::bad_arguments(format!("argument `{name}` has wrong shape: {err}"))
        })
    }

    /// Binds an optional argument by name; absent keys yield `Ok(None)`.
    pub fn get_opt<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ActionFailure> {
        match self.0.get(name) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|err| {
                ActionFailure::bad_arguments(format!("argument `{name}` has wrong shape: {err}"))
            }),
        }
    }

    /// The raw argument map, for handlers that need untyped access.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// An object-safe, per-agent-type action handler.
///
/// This is the one place in the crate where dynamic dispatch is used: the
/// core's dispatch-by-name requirement cannot be expressed with the static
/// generics the rest of the crate otherwise prefers. See `DESIGN.md`. A
/// handler is any `Fn` borrowing its agent and context for the duration of
/// its returned future — the same higher-ranked boxed-future shape
/// `async_trait` itself expands to, used directly here since the registry
/// needs to store handlers for many distinct closures under one type.
pub trait ActionFn<T: Agent>: Send + Sync {
    fn call<'a>(
        &'a self,
        agent: &'a mut T,
        args: ActionArgs,
        ctx: &'a mut AgentContext<T>,
    ) -> ActionFuture<'a>;
}

impl<T, F> ActionFn<T> for F
where
    T: Agent,
    F: for<'a> Fn(&'a mut T, ActionArgs, &'a mut AgentContext<T>) -> ActionFuture<'a> + Send + Sync,
{
    fn call<'a>(
        &'a self,
        agent: &'a mut T,
        args: ActionArgs,
        ctx: &'a mut AgentContext<T>,
    ) -> ActionFuture<'a> {
        (self)(agent, args, ctx)
    }
}
