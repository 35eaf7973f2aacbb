//! Declarative machine configuration.
//!
//! A configuration names the initial state and the transition table. It can
//! be assembled in code or read from JSON:
//!
//! ```json
//! {
//!   "initial": "idle",
//!   "states": {
//!     "idle":    { "transitions": { "start": "running" } },
//!     "running": { "transitions": { "stop": "idle" } }
//!   }
//! }
//! ```
//!
//! Validation collects every violation in one pass using stillwater's
//! `Validation`, so a broken configuration is reported in full.

use crate::core::{Event, EventId, State, StateId, StateTable};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::{ConfigError, ConfigViolation};

/// Configuration of a machine: where it starts and how it moves.
///
/// # Example
///
/// ```rust
/// use turnstile::config::MachineConfig;
/// use turnstile::core::{EventId, StateId};
///
/// let config: MachineConfig<StateId, EventId> = MachineConfig::from_json(r#"{
///     "initial": "idle",
///     "states": {
///         "idle": {"transitions": {"start": "running"}},
///         "running": {"transitions": {"stop": "idle"}}
///     }
/// }"#).unwrap();
///
/// assert_eq!(config.initial, "idle");
/// assert!(config.check().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineConfig<S: State = StateId, E: Event = EventId> {
    pub initial: S,
    pub states: StateTable<S, E>,
}

impl<S: State, E: Event> MachineConfig<S, E> {
    pub fn new(initial: S, states: StateTable<S, E>) -> Self {
        Self { initial, states }
    }

    /// Parse a configuration from a JSON document.
    ///
    /// Only the shape is checked here; call [`check`](Self::check) or hand
    /// the result to [`StateMachine::new`](crate::engine::StateMachine::new)
    /// to validate references.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Validate the configuration, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        if self.states.is_empty() {
            checks.push(Validation::fail(ConfigViolation::NoStates));
        }

        let initial_check = if self.states.contains(&self.initial) {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::UnknownInitialState {
                initial: self.initial.name().to_string(),
            })
        };
        checks.push(initial_check);

        for (state, definition) in self.states.iter() {
            for (event, target) in &definition.transitions {
                if !self.states.contains(target) {
                    checks.push(Validation::fail(ConfigViolation::UnknownTarget {
                        state: state.name().to_string(),
                        event: event.name().to_string(),
                        target: target.name().to_string(),
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate and convert the outcome into a `Result`.
    pub fn check(&self) -> Result<(), ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}
