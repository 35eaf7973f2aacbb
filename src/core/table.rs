//! Ordered transition table.
//!
//! The table maps every declared state to its [`StateDefinition`]. States
//! keep the order in which they were declared, which is the order
//! enumeration returns them in; lookups go through a hash index.

use super::state::{Event, State};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Outgoing transitions of a single state, keyed by event.
///
/// An event may appear only once per state; inserting it again replaces the
/// destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateDefinition<S: State, E: Event> {
    #[serde(default)]
    pub transitions: HashMap<E, S>,
}

impl<S: State, E: Event> Default for StateDefinition<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateDefinition<S, E> {
    /// Create a definition with no outgoing transitions.
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
        }
    }

    /// Add a transition, returning the updated definition.
    pub fn on(mut self, event: E, target: S) -> Self {
        self.transitions.insert(event, target);
        self
    }

    /// Destination reached by `event` from this state, if any.
    pub fn target<Q>(&self, event: &Q) -> Option<&S>
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.transitions.get(event)
    }

    pub fn handles<Q>(&self, event: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.transitions.contains_key(event)
    }
}

/// Insertion-ordered mapping from state to definition.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{EventId, StateDefinition, StateId, StateTable};
///
/// let mut table: StateTable<StateId, EventId> = StateTable::new();
/// table.insert("idle".into(), StateDefinition::new().on("start".into(), "running".into()));
/// table.insert("running".into(), StateDefinition::new().on("stop".into(), "idle".into()));
///
/// let names: Vec<&str> = table.keys().map(|s| s.as_str()).collect();
/// assert_eq!(names, ["idle", "running"]);
/// assert_eq!(table.get("idle").and_then(|d| d.target("start")), Some(&StateId::from("running")));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateTable<S: State, E: Event> {
    entries: Vec<(S, StateDefinition<S, E>)>,
    index: HashMap<S, usize>,
}

impl<S: State, E: Event> Default for StateTable<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateTable<S, E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a state definition.
    ///
    /// A state that is already present keeps its position and has its
    /// definition replaced; the previous definition is returned.
    pub fn insert(
        &mut self,
        state: S,
        definition: StateDefinition<S, E>,
    ) -> Option<StateDefinition<S, E>> {
        match self.index.get(&state).copied() {
            Some(position) => Some(std::mem::replace(
                &mut self.entries[position].1,
                definition,
            )),
            None => {
                self.index.insert(state.clone(), self.entries.len());
                self.entries.push((state, definition));
                None
            }
        }
    }

    pub fn get<Q>(&self, state: &Q) -> Option<&StateDefinition<S, E>>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(state).map(|&position| &self.entries[position].1)
    }

    pub(crate) fn get_mut(&mut self, state: &S) -> Option<&mut StateDefinition<S, E>> {
        let position = *self.index.get(state)?;
        Some(&mut self.entries[position].1)
    }

    /// The stored identifier equal to `state`, if declared.
    pub fn key<Q>(&self, state: &Q) -> Option<&S>
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(state).map(|&position| &self.entries[position].0)
    }

    pub fn contains<Q>(&self, state: &Q) -> bool
    where
        S: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(state)
    }

    /// Declared states in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|(state, _)| state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &StateDefinition<S, E>)> {
        self.entries
            .iter()
            .map(|(state, definition)| (state, definition))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State, E: Event> FromIterator<(S, StateDefinition<S, E>)> for StateTable<S, E> {
    fn from_iter<I: IntoIterator<Item = (S, StateDefinition<S, E>)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (state, definition) in iter {
            table.insert(state, definition);
        }
        table
    }
}

impl<S: State, E: Event> Serialize for StateTable<S, E> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (state, definition) in &self.entries {
            map.serialize_entry(state, definition)?;
        }
        map.end()
    }
}

struct StateTableVisitor<S, E>(PhantomData<(S, E)>);

impl<'de, S: State, E: Event> Visitor<'de> for StateTableVisitor<S, E> {
    type Value = StateTable<S, E>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from state to state definition")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = StateTable::new();
        while let Some((state, definition)) = access.next_entry::<S, StateDefinition<S, E>>()? {
            if table.contains(&state) {
                return Err(de::Error::custom(format!(
                    "state '{}' is declared more than once",
                    state.name()
                )));
            }
            table.insert(state, definition);
        }
        Ok(table)
    }
}

impl<'de, S: State, E: Event> Deserialize<'de> for StateTable<S, E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StateTableVisitor(PhantomData))
    }
}
