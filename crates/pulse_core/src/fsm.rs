//! State Machine Runtime
//!
//! Flat, table-driven state machines over typed states and inputs.
//! Supports:
//! - Explicit `(from, input) -> to` transitions
//! - Wildcard transitions that apply from any state
//! - Pure lookups (`resolve`) for callers that compute side effects themselves
//! - A bounded transition history for debugging
//!
//! Inputs with no matching transition leave the machine untouched.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Default number of transitions kept in the history ring
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// Bounds shared by state and input types
pub trait MachineKey: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> MachineKey for T {}

/// Builder for creating state machines
pub struct StateMachineBuilder<S: MachineKey, E: MachineKey> {
    initial_state: S,
    transitions: FxHashMap<(S, E), S>,
    wildcards: FxHashMap<E, S>,
    history_limit: usize,
}

impl<S: MachineKey, E: MachineKey> StateMachineBuilder<S, E> {
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: FxHashMap::default(),
            wildcards: FxHashMap::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Add a transition (from, input, to). A later call for the same pair wins.
    pub fn on(mut self, from: S, input: E, to: S) -> Self {
        self.transitions.insert((from, input), to);
        self
    }

    /// Add a transition taken from every state that has no explicit entry for `input`
    pub fn on_any(mut self, input: E, to: S) -> Self {
        self.wildcards.insert(input, to);
        self
    }

    /// Number of transitions retained in history (0 disables history)
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            wildcards: self.wildcards,
            history: VecDeque::new(),
            history_limit: self.history_limit,
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S: MachineKey, E: MachineKey> {
    current_state: S,
    transitions: FxHashMap<(S, E), S>,
    wildcards: FxHashMap<E, S>,
    history: VecDeque<(S, E, S)>,
    history_limit: usize,
}

impl<S: MachineKey, E: MachineKey> StateMachine<S, E> {
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Look up the target of `input` from an arbitrary state without mutating anything
    pub fn resolve(&self, from: S, input: E) -> Option<S> {
        self.transitions
            .get(&(from, input))
            .or_else(|| self.wildcards.get(&input))
            .copied()
    }

    /// Check if an input can trigger a transition from the current state
    pub fn can_send(&self, input: E) -> bool {
        self.resolve(self.current_state, input).is_some()
    }

    /// Send an input, returning the state the machine is in afterwards
    pub fn send(&mut self, input: E) -> S {
        let current = self.current_state;

        let Some(to_state) = self.resolve(current, input) else {
            tracing::trace!(?current, ?input, "fsm: no transition");
            return current;
        };

        self.current_state = to_state;
        self.record(current, input, to_state);
        to_state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, E, S)> {
        self.history.iter()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, from: S, input: E, to: S) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back((from, input, to));
    }
}
