//! State Machine Runtime
//!
//! Flat state machines driven by event type identifiers. States are plain
//! enums that implement [`StateTransitions`]; [`StateMachine`] wraps one and
//! keeps a bounded history of the transitions it took.

use std::hash::Hash;

use crate::events::EventType;

/// Maximum number of transitions remembered for debugging
const HISTORY_LIMIT: usize = 64;

/// Trait for state types that can handle event transitions
///
/// Implement this trait on a state enum to define how events cause
/// state transitions.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// History of state transitions (for debugging)
    history: Vec<(S, EventType, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in its initial state
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event to the state machine, potentially triggering a transition
    ///
    /// Returns the state after the event. Events with no matching transition
    /// leave the machine where it is.
    pub fn send(&mut self, event: EventType) -> S {
        let current = self.current_state;
        let Some(next) = current.on_event(event) else {
            return current;
        };

        tracing::debug!(?current, event, ?next, "state transition");

        self.current_state = next;
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((current, event, next));
        next
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
