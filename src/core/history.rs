//! Undo/redo history of visited states.
//!
//! Two stacks cooperate: `visited` records every state entered, newest
//! last, and `undone` collects states stepped back out of by an undo so a
//! redo can re-enter them. A counter of event-driven transitions since the
//! last undo decides whether redo is still allowed.

use super::state::State;

/// The pair of history stacks owned by a state machine.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{StateHistory, StateId};
///
/// let idle = StateId::from("idle");
/// let running = StateId::from("running");
///
/// let mut history = StateHistory::new(idle.clone());
/// history.record(running.clone());
///
/// let previous = history.step_back(&running, &idle);
/// assert_eq!(previous, Some(idle.clone()));
/// assert_eq!(history.undone(), [running.clone()]);
///
/// assert_eq!(history.step_forward(&idle, &idle), Some(running));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateHistory<S: State> {
    visited: Vec<S>,
    undone: Vec<S>,
    transitions_since_undo: usize,
}

impl<S: State> StateHistory<S> {
    /// Create a history seeded with the initial state.
    pub fn new(initial: S) -> Self {
        Self {
            visited: vec![initial],
            undone: Vec::new(),
            transitions_since_undo: 0,
        }
    }

    /// Record a state entered by a direct jump.
    pub fn record(&mut self, state: S) {
        self.visited.push(state);
    }

    /// Record a state entered through an event, which blocks redo until the
    /// next undo.
    pub fn record_transition(&mut self, state: S) {
        self.visited.push(state);
        self.transitions_since_undo += 1;
    }

    /// States entered so far, oldest first.
    pub fn visited(&self) -> &[S] {
        &self.visited
    }

    /// States available to redo; the next one to be re-entered is last.
    pub fn undone(&self) -> &[S] {
        &self.undone
    }

    pub fn transitions_since_undo(&self) -> usize {
        self.transitions_since_undo
    }

    pub fn can_step_back(&self, current: &S, initial: &S) -> bool {
        current != initial && !self.visited.is_empty()
    }

    pub fn can_step_forward(&self, current: &S, initial: &S) -> bool {
        if current == initial && self.undone.is_empty() {
            return false;
        }
        !self.undone.is_empty() && !self.visited.is_empty() && self.transitions_since_undo == 0
    }

    /// Step back one entry, returning the state to make current.
    ///
    /// `current` moves onto the undo stack and the newest visited entry is
    /// dropped. The state before it becomes current; when there is none
    /// (history was cleared since), `initial` is used instead.
    pub fn step_back(&mut self, current: &S, initial: &S) -> Option<S> {
        if !self.can_step_back(current, initial) {
            return None;
        }

        self.undone.push(current.clone());
        let previous = match self.visited.len() {
            0 | 1 => initial.clone(),
            len => self.visited[len - 2].clone(),
        };
        self.visited.pop();
        self.transitions_since_undo = 0;
        Some(previous)
    }

    /// Re-enter the most recently undone state, returning it.
    pub fn step_forward(&mut self, current: &S, initial: &S) -> Option<S> {
        if !self.can_step_forward(current, initial) {
            return None;
        }

        let next = self.undone.pop()?;
        self.visited.push(next.clone());
        Some(next)
    }

    /// Forget visited states. The undo stack and counter are kept.
    pub fn clear(&mut self) {
        self.visited.clear();
    }
}
