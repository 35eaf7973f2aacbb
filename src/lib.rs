//! Turnstile: a declarative finite-state machine engine with undo/redo
//!
//! A machine is described by a configuration: an initial state and, for
//! every state, the events it accepts and where each one leads. The engine
//! tracks the current state, applies event-driven transitions and direct
//! jumps, and keeps a linear history of visited states that can be walked
//! back with `undo` and forward again with `redo`.
//!
//! # Core Concepts
//!
//! - **State / Event**: Opaque identifiers, either string-backed
//!   (`StateId`, `EventId`) or plain enums via `state_enum!`/`event_enum!`
//! - **Configuration**: Ordered transition table, loadable from JSON and
//!   validated up front
//! - **History**: Visited states plus an undo stack; redo is only available
//!   until the next event-driven transition
//!
//! # Example
//!
//! ```rust
//! use turnstile::StateMachineBuilder;
//! use turnstile::StateMachine;
//!
//! let mut machine: StateMachine = StateMachineBuilder::new()
//!     .initial("idle")
//!     .transition("idle", "start", "running")
//!     .transition("running", "stop", "idle")
//!     .build()
//!     .unwrap();
//!
//! machine.trigger("start").unwrap();
//! assert_eq!(machine.current_state(), "running");
//! assert!(machine.trigger("start").is_err());
//!
//! assert!(machine.undo());
//! assert_eq!(machine.current_state(), "idle");
//! assert!(machine.redo());
//! assert_eq!(machine.current_state(), "running");
//! ```
//!
//! The engine is synchronous and performs no locking; share it across
//! threads behind a mutex if needed.

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use config::{ConfigError, MachineConfig};
pub use crate::core::{Event, EventId, State, StateId};
pub use engine::{StateMachine, TransitionError};
