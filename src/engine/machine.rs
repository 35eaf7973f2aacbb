//! State machine with undo/redo history.

use crate::config::{ConfigError, MachineConfig};
use crate::core::{Event, EventId, State, StateHistory, StateId};
use crate::engine::error::TransitionError;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

/// Finite-state machine driven by a declarative transition table.
///
/// # Example
///
/// ```rust
/// use turnstile::engine::StateMachine;
///
/// let mut machine: StateMachine = StateMachine::from_json(r#"{
///     "initial": "idle",
///     "states": {
///         "idle": {"transitions": {"start": "running"}},
///         "running": {"transitions": {"stop": "idle"}}
///     }
/// }"#).unwrap();
///
/// // Undo is refused at the initial state.
/// assert!(!machine.undo());
///
/// machine.trigger("start").unwrap().trigger("stop").unwrap().trigger("start").unwrap();
/// assert_eq!(machine.current_state(), "running");
///
/// assert!(machine.undo());
/// assert_eq!(machine.current_state(), "idle");
/// assert!(machine.redo());
/// assert_eq!(machine.current_state(), "running");
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine<S: State = StateId, E: Event = EventId> {
    config: MachineConfig<S, E>,
    current: S,
    history: StateHistory<S>,
}

impl<S: State, E: Event> StateMachine<S, E> {
    /// Create a machine in the configured initial state.
    ///
    /// The configuration is validated first: the initial state and every
    /// transition target must be declared states.
    pub fn new(config: MachineConfig<S, E>) -> Result<Self, ConfigError> {
        config.check()?;

        let current = config.initial.clone();
        debug!(
            initial = current.name(),
            states = config.states.len(),
            "Created state machine"
        );

        Ok(Self {
            history: StateHistory::new(current.clone()),
            current,
            config,
        })
    }

    /// Parse, validate and build a machine from a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(MachineConfig::from_json(json)?)
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// The state the machine starts in and returns to on [`reset`](Self::reset).
    pub fn initial_state(&self) -> &S {
        &self.config.initial
    }

    /// The validated configuration the machine was built from.
    pub fn config(&self) -> &MachineConfig<S, E> {
        &self.config
    }

    /// States entered so far, oldest first.
    pub fn history(&self) -> &[S] {
        self.history.visited()
    }

    /// States available to redo, most recently undone last.
    pub fn undo_history(&self) -> &[S] {
        self.history.undone()
    }

    /// Event-driven transitions since the last undo.
    pub fn transition_count(&self) -> usize {
        self.history.transitions_since_undo()
    }

    /// Whether [`undo`](Self::undo) would step back right now.
    pub fn can_undo(&self) -> bool {
        self.history.can_step_back(&self.current, &self.config.initial)
    }

    /// Whether [`redo`](Self::redo) would step forward right now.
    pub fn can_redo(&self) -> bool {
        self.history
            .can_step_forward(&self.current, &self.config.initial)
    }

    /// Jump to any declared state, ignoring the transition table.
    ///
    /// The jump is recorded in history but does not count as an
    /// event-driven transition, so it does not block redo.
    pub fn change_state<Q>(&mut self, target: &Q) -> Result<&mut Self, TransitionError>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let Some(state) = self.config.states.key(target).cloned() else {
            trace!(requested = ?target, "Rejected jump to undeclared state");
            return Err(TransitionError::InvalidState {
                state: requested_name(target),
            });
        };

        debug!(from = self.current.name(), to = state.name(), "Changed state");
        self.current = state.clone();
        self.history.record(state);
        Ok(self)
    }

    /// Fire `event` from the current state.
    pub fn trigger<Q>(&mut self, event: &Q) -> Result<&mut Self, TransitionError>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let target = self
            .config
            .states
            .get(&self.current)
            .and_then(|definition| definition.target(event))
            .cloned();

        let Some(target) = target else {
            trace!(
                state = self.current.name(),
                event = ?event,
                "Rejected event with no transition"
            );
            return Err(TransitionError::NoTransition {
                state: self.current.name().to_string(),
                event: requested_name(event),
            });
        };

        debug!(
            from = self.current.name(),
            to = target.name(),
            event = ?event,
            "Applied transition"
        );
        self.current = target.clone();
        self.history.record_transition(target);
        Ok(self)
    }

    /// Return to the initial state. History is left untouched; see
    /// [`clear_history`](Self::clear_history).
    pub fn reset(&mut self) {
        debug!(from = self.current.name(), "Reset to initial state");
        self.current = self.config.initial.clone();
    }

    /// All declared states, in configuration order.
    pub fn states(&self) -> Vec<&S> {
        self.config.states.keys().collect()
    }

    /// States from which `event` can be fired, in configuration order.
    pub fn states_with_event<Q>(&self, event: &Q) -> Vec<&S>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.config
            .states
            .iter()
            .filter(|(_, definition)| definition.handles(event))
            .map(|(state, _)| state)
            .collect()
    }

    /// Step back to the previously visited state.
    ///
    /// Returns `false` without changing anything when the machine is at its
    /// initial state or history is empty.
    pub fn undo(&mut self) -> bool {
        match self
            .history
            .step_back(&self.current, &self.config.initial)
        {
            Some(previous) => {
                debug!(from = self.current.name(), to = previous.name(), "Undo");
                self.current = previous;
                true
            }
            None => {
                trace!(state = self.current.name(), "Undo unavailable");
                false
            }
        }
    }

    /// Re-enter the most recently undone state.
    ///
    /// Only available directly after one or more undos: any successful
    /// [`trigger`](Self::trigger) in between disables it until the next undo.
    pub fn redo(&mut self) -> bool {
        match self
            .history
            .step_forward(&self.current, &self.config.initial)
        {
            Some(next) => {
                debug!(from = self.current.name(), to = next.name(), "Redo");
                self.current = next;
                true
            }
            None => {
                trace!(state = self.current.name(), "Redo unavailable");
                false
            }
        }
    }

    /// Forget visited states. The undo stack is kept.
    pub fn clear_history(&mut self) {
        debug!(entries = self.history.visited().len(), "Cleared history");
        self.history.clear();
    }
}

/// Render a requested identifier for an error message. String-like
/// identifiers lose the quotes their `Debug` form adds.
fn requested_name<Q: Debug + ?Sized>(value: &Q) -> String {
    let rendered = format!("{value:?}");
    match rendered
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.to_string(),
        None => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateDefinition, StateTable};

    fn idle_running() -> StateMachine {
        StateMachine::from_json(
            r#"{
                "initial": "idle",
                "states": {
                    "idle": {"transitions": {"start": "running"}},
                    "running": {"transitions": {"stop": "idle"}}
                }
            }"#,
        )
        .unwrap()
    }

    fn pipeline() -> StateMachine {
        StateMachine::from_json(
            r#"{
                "initial": "draft",
                "states": {
                    "draft": {"transitions": {"submit": "review"}},
                    "review": {"transitions": {"approve": "published", "reject": "draft"}},
                    "published": {"transitions": {"reject": "archived"}},
                    "archived": {}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn starts_in_initial_state() {
        let machine = idle_running();
        assert_eq!(machine.current_state(), "idle");
        assert_eq!(machine.initial_state(), "idle");
        assert_eq!(machine.history(), [StateId::from("idle")]);
        assert!(machine.undo_history().is_empty());
        assert_eq!(machine.transition_count(), 0);
    }

    #[test]
    fn states_lists_configuration_order() {
        let machine = pipeline();
        let names: Vec<&str> = machine.states().into_iter().map(StateId::as_str).collect();
        assert_eq!(names, ["draft", "review", "published", "archived"]);
    }

    #[test]
    fn states_with_event_filters_by_transition_key() {
        let machine = idle_running();
        assert_eq!(machine.states_with_event("start"), [&StateId::from("idle")]);
        assert_eq!(machine.states_with_event("stop"), [&StateId::from("running")]);
        assert!(machine.states_with_event("explode").is_empty());

        let pipeline = pipeline();
        let rejecting: Vec<&str> = pipeline
            .states_with_event("reject")
            .into_iter()
            .map(StateId::as_str)
            .collect();
        assert_eq!(rejecting, ["review", "published"]);
    }

    #[test]
    fn change_state_jumps_to_any_declared_state() {
        let mut machine = pipeline();
        machine.change_state("archived").unwrap();

        assert_eq!(machine.current_state(), "archived");
        assert_eq!(
            machine.history(),
            [StateId::from("draft"), StateId::from("archived")]
        );
        assert_eq!(machine.transition_count(), 0);
    }

    #[test]
    fn change_state_rejects_undeclared_state() {
        let mut machine = idle_running();
        let err = machine.change_state("sleeping").unwrap_err();

        assert!(matches!(err, TransitionError::InvalidState { .. }));
        assert_eq!(err.to_string(), "'sleeping' is not a declared state");
        assert_eq!(machine.current_state(), "idle");
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn trigger_follows_current_state_table() {
        let mut machine = idle_running();
        machine.trigger("start").unwrap();

        assert_eq!(machine.current_state(), "running");
        assert_eq!(machine.transition_count(), 1);
        assert_eq!(machine.history().len(), 2);
    }

    #[test]
    fn trigger_rejects_event_not_valid_here() {
        let mut machine = idle_running();
        let err = machine.trigger("stop").unwrap_err();

        assert_eq!(
            err,
            TransitionError::NoTransition {
                state: "idle".to_string(),
                event: "stop".to_string(),
            }
        );
        assert_eq!(machine.current_state(), "idle");
        assert_eq!(machine.transition_count(), 0);
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn same_event_routes_per_state() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap().trigger("reject").unwrap();
        assert_eq!(machine.current_state(), "draft");

        machine.change_state("published").unwrap().trigger("reject").unwrap();
        assert_eq!(machine.current_state(), "archived");
    }

    #[test]
    fn mutators_chain() {
        let mut machine = pipeline();
        machine
            .trigger("submit")
            .unwrap()
            .trigger("approve")
            .unwrap()
            .change_state("draft")
            .unwrap();

        assert_eq!(machine.current_state(), "draft");
        assert_eq!(machine.history().len(), 4);
        assert_eq!(machine.transition_count(), 2);
    }

    #[test]
    fn reset_keeps_history() {
        let mut machine = idle_running();
        machine.trigger("start").unwrap();
        machine.reset();

        assert_eq!(machine.current_state(), "idle");
        assert_eq!(machine.history().len(), 2);
        assert_eq!(machine.transition_count(), 1);
    }

    #[test]
    fn reset_keeps_undo_history() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap().trigger("approve").unwrap();
        machine.undo();
        machine.reset();

        assert_eq!(machine.current_state(), "draft");
        assert_eq!(machine.undo_history(), [StateId::from("published")]);
        assert_eq!(machine.transition_count(), 0);
        assert!(machine.redo());
        assert_eq!(machine.current_state(), "published");
    }

    #[test]
    fn redo_is_refused_after_clear_history() {
        let mut machine = idle_running();
        machine.trigger("start").unwrap();
        assert!(machine.undo());
        machine.clear_history();

        assert_eq!(machine.undo_history(), [StateId::from("running")]);
        assert_eq!(machine.transition_count(), 0);
        assert!(!machine.can_redo());
        assert!(!machine.redo());
        assert_eq!(machine.current_state(), "idle");
        assert_eq!(machine.undo_history(), [StateId::from("running")]);
    }

    #[test]
    fn error_messages_quote_names_alike() {
        let mut machine = idle_running();

        let invalid = machine.change_state("sleeping").unwrap_err();
        let no_transition = machine.trigger("stop").unwrap_err();

        assert_eq!(invalid.to_string(), "'sleeping' is not a declared state");
        assert_eq!(
            no_transition.to_string(),
            "No transition for event 'stop' from state 'idle'"
        );
    }

    #[test]
    fn undo_at_initial_state_is_refused() {
        let mut machine = idle_running();
        assert!(!machine.can_undo());
        assert!(!machine.undo());
        assert_eq!(machine.current_state(), "idle");
        assert!(machine.undo_history().is_empty());
    }

    #[test]
    fn undo_walks_back_to_initial() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap().trigger("approve").unwrap();

        assert!(machine.undo());
        assert_eq!(machine.current_state(), "review");
        assert!(machine.undo());
        assert_eq!(machine.current_state(), "draft");
        assert!(!machine.undo());
        assert_eq!(
            machine.undo_history(),
            [StateId::from("published"), StateId::from("review")]
        );
    }

    #[test]
    fn undo_resets_transition_count() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap().trigger("approve").unwrap();
        assert_eq!(machine.transition_count(), 2);

        machine.undo();
        assert_eq!(machine.transition_count(), 0);
    }

    #[test]
    fn change_state_then_undo_restores_previous() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap();
        machine.change_state("archived").unwrap();

        assert!(machine.undo());
        assert_eq!(machine.current_state(), "review");
    }

    #[test]
    fn change_state_undo_redo_round_trip() {
        let mut machine = pipeline();
        machine.change_state("published").unwrap();

        assert!(machine.undo());
        assert_eq!(machine.current_state(), "draft");
        assert!(machine.redo());
        assert_eq!(machine.current_state(), "published");
        assert_eq!(
            machine.history(),
            [StateId::from("draft"), StateId::from("published")]
        );
        assert!(machine.undo_history().is_empty());
    }

    #[test]
    fn redo_without_undo_is_refused() {
        let mut machine = idle_running();
        assert!(!machine.redo());

        machine.trigger("start").unwrap();
        assert!(!machine.can_redo());
        assert!(!machine.redo());
        assert_eq!(machine.current_state(), "running");
    }

    #[test]
    fn redo_is_blocked_by_trigger_after_undo() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap().trigger("approve").unwrap();
        machine.undo();
        machine.trigger("reject").unwrap();

        assert!(!machine.redo());
        assert_eq!(machine.current_state(), "draft");
    }

    #[test]
    fn redo_survives_change_state_after_undo() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap();
        machine.undo();
        machine.change_state("archived").unwrap();

        assert!(machine.redo());
        assert_eq!(machine.current_state(), "review");
    }

    #[test]
    fn multiple_undos_redo_in_reverse_order() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap().trigger("approve").unwrap();
        machine.undo();
        machine.undo();

        assert!(machine.redo());
        assert_eq!(machine.current_state(), "review");
        assert!(machine.redo());
        assert_eq!(machine.current_state(), "published");
        assert!(!machine.redo());
    }

    #[test]
    fn clear_history_disables_undo() {
        let mut machine = idle_running();
        machine.trigger("start").unwrap();
        machine.clear_history();

        assert!(machine.history().is_empty());
        assert!(!machine.undo());
        assert_eq!(machine.current_state(), "running");
    }

    #[test]
    fn undo_after_clear_and_single_jump_falls_back_to_initial() {
        let mut machine = pipeline();
        machine.trigger("submit").unwrap();
        machine.clear_history();
        machine.change_state("published").unwrap();

        assert!(machine.undo());
        assert_eq!(machine.current_state(), "draft");
    }

    #[test]
    fn idle_running_scenario() {
        let mut machine = idle_running();

        machine.trigger("start").unwrap();
        assert_eq!(machine.current_state(), "running");
        machine.trigger("stop").unwrap();
        assert_eq!(machine.current_state(), "idle");
        machine.trigger("start").unwrap();
        assert_eq!(machine.current_state(), "running");

        assert!(machine.undo());
        assert_eq!(machine.current_state(), "idle");
        assert!(machine.redo());
        assert_eq!(machine.current_state(), "running");

        machine.trigger("stop").unwrap();
        assert_eq!(machine.current_state(), "idle");
        assert!(!machine.redo());
    }

    #[test]
    fn self_loop_on_initial_state_blocks_redo() {
        let mut gate: StateMachine = StateMachine::from_json(
            r#"{
                "initial": "locked",
                "states": {
                    "locked": {"transitions": {"coin": "unlocked", "push": "locked"}},
                    "unlocked": {"transitions": {"push": "locked", "coin": "unlocked"}}
                }
            }"#,
        )
        .unwrap();
        assert!(!gate.undo());

        gate.trigger("coin").unwrap().trigger("push").unwrap().trigger("coin").unwrap();
        assert_eq!(gate.current_state(), "unlocked");

        assert!(gate.undo());
        assert_eq!(gate.current_state(), "locked");
        assert!(gate.redo());
        assert_eq!(gate.current_state(), "unlocked");

        assert!(gate.undo());
        gate.trigger("push").unwrap();
        assert_eq!(gate.current_state(), "locked");
        assert!(!gate.redo());
        assert_eq!(gate.current_state(), "locked");
    }

    #[test]
    fn new_rejects_unknown_initial_state() {
        let mut states: StateTable<StateId, EventId> = StateTable::new();
        states.insert("idle".into(), StateDefinition::new());

        let result = StateMachine::new(MachineConfig::new(StateId::from("missing"), states));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn new_rejects_dangling_transition_target() {
        let result: Result<StateMachine, _> = StateMachine::from_json(
            r#"{"initial": "idle", "states": {"idle": {"transitions": {"go": "nowhere"}}}}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(v)) if v.len() == 1));
    }
}
