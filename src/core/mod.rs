//! Core state machine types.
//!
//! This module contains the data the engine works over:
//! - Identifier traits for states and events, with string-backed defaults
//! - The ordered transition table
//! - The undo/redo history stacks

mod history;
mod state;
mod table;

pub use history::StateHistory;
pub use state::{Event, EventId, State, StateId};
pub use table::{StateDefinition, StateTable};
