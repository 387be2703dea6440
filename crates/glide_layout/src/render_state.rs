//! RenderState - Dynamic render properties separate from tree structure
//!
//! The layout tree holds structure and sizes. RenderState holds what a
//! compositor would: each node's translation, opacity and transition timing,
//! plus the transitions currently playing between old and new values.
//!
//! Writing a property follows CSS transition rules:
//!
//! | Duration | Effect of a write |
//! |----------|-------------------|
//! | 0 ms     | Value applies immediately, no end notification |
//! | > 0 ms   | Value animates from its current rendered value; an end notification follows |
//!
//! Writing a value equal to the rendered one starts nothing. Setting a
//! duration to zero freezes a running transition at its current rendered
//! value without notifying.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use glide_animation::{Easing, Transition, TransitionId, TransitionScheduler};
use glide_core::events::TransitionProperty;
use glide_core::Point;

use crate::tree::LayoutNodeId;

/// Transition timing of a node, one duration per animated property
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionTiming {
    pub transform_ms: f32,
    pub opacity_ms: f32,
    pub easing: Easing,
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            transform_ms: 0.0,
            opacity_ms: 0.0,
            easing: Easing::Linear,
        }
    }
}

/// Dynamic render state for a single node
#[derive(Clone, Debug)]
pub struct NodeRenderState {
    /// Specified translation (the value transitions run towards)
    pub translate: Point,
    /// Specified opacity (0.0 - 1.0)
    pub opacity: f32,
    pub timing: TransitionTiming,

    /// Transition IDs for (translate_x, translate_y)
    transform_transition: Option<[TransitionId; 2]>,
    opacity_transition: Option<TransitionId>,
}

impl Default for NodeRenderState {
    fn default() -> Self {
        Self {
            translate: Point::ZERO,
            opacity: 1.0,
            timing: TransitionTiming::default(),
            transform_transition: None,
            opacity_transition: None,
        }
    }
}

/// A transition that completed during a tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletedTransition {
    pub node: LayoutNodeId,
    pub property: TransitionProperty,
    pub elapsed_ms: f32,
}

/// Render state for every node that has one
#[derive(Default)]
pub struct RenderState {
    nodes: FxHashMap<LayoutNodeId, NodeRenderState>,
    scheduler: TransitionScheduler,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: LayoutNodeId) -> Option<&NodeRenderState> {
        self.nodes.get(&node)
    }

    fn entry(&mut self, node: LayoutNodeId) -> &mut NodeRenderState {
        self.nodes.entry(node).or_default()
    }

    /// Drop a node's state and any transitions it owns
    pub fn remove(&mut self, node: LayoutNodeId) {
        if let Some(state) = self.nodes.remove(&node) {
            if let Some([x, y]) = state.transform_transition {
                self.scheduler.remove(x);
                self.scheduler.remove(y);
            }
            if let Some(id) = state.opacity_transition {
                self.scheduler.remove(id);
            }
        }
    }

    pub fn timing(&self, node: LayoutNodeId) -> TransitionTiming {
        self.nodes
            .get(&node)
            .map(|state| state.timing)
            .unwrap_or_default()
    }

    /// Replace a node's timing. Zeroed durations freeze running transitions.
    pub fn set_timing(&mut self, node: LayoutNodeId, timing: TransitionTiming) {
        if timing.transform_ms <= 0.0 {
            self.freeze_transform(node);
        }
        if timing.opacity_ms <= 0.0 {
            self.freeze_opacity(node);
        }
        self.entry(node).timing = timing;
    }

    pub fn set_transform_duration(&mut self, node: LayoutNodeId, duration_ms: f32) {
        let timing = TransitionTiming {
            transform_ms: duration_ms,
            ..self.timing(node)
        };
        self.set_timing(node, timing);
    }

    /// Rendered translation, mid-transition values included
    pub fn computed_translate(&self, node: LayoutNodeId) -> Point {
        let Some(state) = self.nodes.get(&node) else {
            return Point::ZERO;
        };
        match state.transform_transition {
            Some([x, y]) => Point::new(
                self.scheduler.value(x).unwrap_or(state.translate.x),
                self.scheduler.value(y).unwrap_or(state.translate.y),
            ),
            None => state.translate,
        }
    }

    /// Rendered opacity, mid-transition values included
    pub fn computed_opacity(&self, node: LayoutNodeId) -> f32 {
        let Some(state) = self.nodes.get(&node) else {
            return 1.0;
        };
        state
            .opacity_transition
            .and_then(|id| self.scheduler.value(id))
            .unwrap_or(state.opacity)
    }

    pub fn set_translate(&mut self, node: LayoutNodeId, translate: Point) {
        let from = self.computed_translate(node);
        self.cancel_transform(node);

        let state = self.entry(node);
        state.translate = translate;
        let timing = state.timing;
        if timing.transform_ms <= 0.0 || from == translate {
            return;
        }

        let x = self.scheduler.add(Transition::new(
            from.x,
            translate.x,
            timing.transform_ms,
            timing.easing,
        ));
        let y = self.scheduler.add(Transition::new(
            from.y,
            translate.y,
            timing.transform_ms,
            timing.easing,
        ));
        self.entry(node).transform_transition = Some([x, y]);
    }

    pub fn set_opacity(&mut self, node: LayoutNodeId, opacity: f32) {
        let from = self.computed_opacity(node);
        if let Some(id) = self.entry(node).opacity_transition.take() {
            self.scheduler.remove(id);
        }

        let state = self.entry(node);
        state.opacity = opacity;
        let timing = state.timing;
        if timing.opacity_ms <= 0.0 || from == opacity {
            return;
        }

        let id = self.scheduler.add(Transition::new(
            from,
            opacity,
            timing.opacity_ms,
            timing.easing,
        ));
        self.entry(node).opacity_transition = Some(id);
    }

    /// True if any transform or opacity transition is still playing
    pub fn is_animating(&self) -> bool {
        self.scheduler.has_active()
    }

    pub fn is_node_animating(&self, node: LayoutNodeId) -> bool {
        self.nodes.get(&node).is_some_and(|state| {
            state.transform_transition.is_some() || state.opacity_transition.is_some()
        })
    }

    /// Advance all transitions and collect the ones that completed
    pub fn tick(&mut self, dt_ms: f32) -> SmallVec<[CompletedTransition; 4]> {
        let finished = self.scheduler.tick(dt_ms);
        let mut completed = SmallVec::new();
        if finished.is_empty() {
            return completed;
        }

        for (&node, state) in self.nodes.iter_mut() {
            if let Some([x, y]) = state.transform_transition {
                let x_done = self.scheduler.get(x).map_or(true, Transition::is_finished);
                let y_done = self.scheduler.get(y).map_or(true, Transition::is_finished);
                if x_done && y_done {
                    let elapsed_ms = self.scheduler.get(x).map_or(0.0, Transition::elapsed_ms);
                    self.scheduler.remove(x);
                    self.scheduler.remove(y);
                    state.transform_transition = None;
                    completed.push(CompletedTransition {
                        node,
                        property: TransitionProperty::Transform,
                        elapsed_ms,
                    });
                }
            }
            if let Some(id) = state.opacity_transition {
                if self.scheduler.get(id).map_or(true, Transition::is_finished) {
                    let elapsed_ms = self.scheduler.get(id).map_or(0.0, Transition::elapsed_ms);
                    self.scheduler.remove(id);
                    state.opacity_transition = None;
                    completed.push(CompletedTransition {
                        node,
                        property: TransitionProperty::Opacity,
                        elapsed_ms,
                    });
                }
            }
        }

        completed
    }

    fn cancel_transform(&mut self, node: LayoutNodeId) {
        if let Some(state) = self.nodes.get_mut(&node) {
            if let Some([x, y]) = state.transform_transition.take() {
                self.scheduler.remove(x);
                self.scheduler.remove(y);
            }
        }
    }

    /// Stop a running transform transition where it currently is
    fn freeze_transform(&mut self, node: LayoutNodeId) {
        let rendered = self.computed_translate(node);
        if let Some(state) = self.nodes.get_mut(&node) {
            if let Some([x, y]) = state.transform_transition.take() {
                self.scheduler.remove(x);
                self.scheduler.remove(y);
                state.translate = rendered;
            }
        }
    }

    fn freeze_opacity(&mut self, node: LayoutNodeId) {
        let rendered = self.computed_opacity(node);
        if let Some(state) = self.nodes.get_mut(&node) {
            if let Some(id) = state.opacity_transition.take() {
                self.scheduler.remove(id);
                state.opacity = rendered;
            }
        }
    }
}
