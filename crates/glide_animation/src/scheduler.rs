//! Transition scheduler
//!
//! Owns all running transitions and advances them each frame.

use crate::transition::Transition;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    pub struct TransitionId;
}

/// Transitions that completed during a single tick
pub type Finished = SmallVec<[TransitionId; 8]>;

/// The scheduler that ticks all active transitions
///
/// Finished transitions stay registered until removed so their final value
/// can still be read; the owner decides when to drop them.
pub struct TransitionScheduler {
    transitions: SlotMap<TransitionId, Transition>,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self {
            transitions: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, transition: Transition) -> TransitionId {
        self.transitions.insert(transition)
    }

    pub fn get(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(id)
    }

    pub fn remove(&mut self, id: TransitionId) -> Option<Transition> {
        self.transitions.remove(id)
    }

    /// Current value of a transition, if it is still registered
    pub fn value(&self, id: TransitionId) -> Option<f32> {
        self.transitions.get(id).map(Transition::value)
    }

    /// Advance every transition by `dt_ms` and report the ones that finished
    pub fn tick(&mut self, dt_ms: f32) -> Finished {
        let mut finished = Finished::new();
        for (id, transition) in self.transitions.iter_mut() {
            if transition.tick(dt_ms) {
                finished.push(id);
            }
        }
        if !finished.is_empty() {
            tracing::trace!(count = finished.len(), "transitions finished");
        }
        finished
    }

    /// Check if any transitions are still playing
    pub fn has_active(&self) -> bool {
        self.transitions.values().any(|t| !t.is_finished())
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl Default for TransitionScheduler {
    fn default() -> Self {
        Self::new()
    }
}
