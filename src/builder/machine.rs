//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Event, EventId, State, StateDefinition, StateId, StateTable};
use crate::engine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// States are declared in the order they are first mentioned as a source,
/// either through [`state`](Self::state) or [`transition`](Self::transition).
/// Transition targets are not declared implicitly; a target that is never
/// declared fails validation at [`build`](Self::build).
pub struct StateMachineBuilder<S: State = StateId, E: Event = EventId> {
    initial: Option<S>,
    states: StateTable<S, E>,
}

impl<S: State, E: Event> StateMachineBuilder<S, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: StateTable::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<S>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state. Declaring it again has no effect.
    pub fn state(mut self, state: impl Into<S>) -> Self {
        let state = state.into();
        if !self.states.contains(&state) {
            self.states.insert(state, StateDefinition::new());
        }
        self
    }

    /// Add a transition, declaring `from` if needed.
    /// A later transition for the same `(from, event)` replaces the target.
    pub fn transition(mut self, from: impl Into<S>, event: impl Into<E>, to: impl Into<S>) -> Self {
        let from = from.into();
        let (event, to) = (event.into(), to.into());
        match self.states.get_mut(&from) {
            Some(definition) => {
                definition.transitions.insert(event, to);
            }
            None => {
                self.states.insert(from, StateDefinition::new().on(event, to));
            }
        }
        self
    }

    /// Produce the configuration without validating it.
    pub fn config(self) -> Result<MachineConfig<S, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        Ok(MachineConfig::new(initial, self.states))
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or the result is invalid.
    pub fn build(self) -> Result<StateMachine<S, E>, BuildError> {
        Ok(StateMachine::new(self.config()?)?)
    }
}

impl<S: State, E: Event> Default for StateMachineBuilder<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
