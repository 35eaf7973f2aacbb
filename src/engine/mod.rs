//! The state machine engine.
//!
//! [`StateMachine`] owns a validated configuration, the current state and
//! the undo/redo history. Event-driven transitions resolve against the
//! current state's table only, so one event name may lead to different
//! places depending on where the machine is. `change_state` jumps directly
//! to any declared state.
//!
//! Rejected `change_state`/`trigger` calls return a [`TransitionError`];
//! `undo`/`redo` report unavailability by returning `false`.

mod error;
mod machine;

pub use error::TransitionError;
pub use machine::StateMachine;
