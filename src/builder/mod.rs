//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and macros for creating state
//! machines in code with minimal boilerplate while keeping identifiers
//! type-safe.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;

use crate::core::{Event, State};
use crate::engine::StateMachine;

/// Build a machine from `(from, event, to)` triples.
///
/// Every state must appear as the source of at least one triple.
///
/// # Example
///
/// ```
/// use turnstile::builder::from_transitions;
/// use turnstile::{event_enum, state_enum};
///
/// state_enum! {
///     enum Light {
///         Red,
///         Green,
///         Yellow,
///     }
/// }
///
/// event_enum! {
///     enum Tick {
///         Next,
///     }
/// }
///
/// let mut light = from_transitions(
///     Light::Red,
///     [
///         (Light::Red, Tick::Next, Light::Green),
///         (Light::Green, Tick::Next, Light::Yellow),
///         (Light::Yellow, Tick::Next, Light::Red),
///     ],
/// )
/// .unwrap();
///
/// light.trigger(&Tick::Next).unwrap();
/// assert_eq!(light.current_state(), &Light::Green);
/// ```
pub fn from_transitions<S, E, I>(initial: S, transitions: I) -> Result<StateMachine<S, E>, BuildError>
where
    S: State,
    E: Event,
    I: IntoIterator<Item = (S, E, S)>,
{
    transitions
        .into_iter()
        .fold(
            StateMachineBuilder::new().initial(initial),
            |builder, (from, event, to)| builder.transition(from, event, to),
        )
        .build()
}
