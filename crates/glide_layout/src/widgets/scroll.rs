//! Touch scroll surface with webkit-style momentum and bounce
//!
//! Turns single-finger touch gestures on a content node into a 2-D offset
//! inside its parent viewport, similar to native scrolling on touch devices.
//!
//! # Example
//!
//! ```rust
//! use glide_core::events::{event_types, TouchPoint};
//! use glide_core::Size;
//! use glide_layout::prelude::*;
//!
//! let mut doc = Document::new(Size::new(320.0, 480.0)).unwrap();
//! let viewport = doc
//!     .create_element(doc.root(), LayoutStyle::viewport(320.0, 400.0))
//!     .unwrap();
//! let content = doc
//!     .create_element(viewport, LayoutStyle::fixed_size(320.0, 1200.0))
//!     .unwrap();
//!
//! let mut surface = ScrollSurface::new(&mut doc, content, ScrollConfig::default()).unwrap();
//!
//! doc.push_touch(event_types::TOUCH_START, TouchPoint::at(0, 100.0, 300.0, content.to_raw()));
//! doc.advance_clock(16);
//! doc.push_touch(event_types::TOUCH_MOVE, TouchPoint::at(0, 100.0, 200.0, content.to_raw()));
//! surface.process_pending(&mut doc).unwrap();
//!
//! assert_eq!(surface.offset().y, -100.0);
//! ```
//!
//! # Behavior
//!
//! - **Drag**: content follows the finger; past an edge it moves at a quarter speed
//! - **Momentum**: release speed projects a glide that decelerates over time
//! - **Bounce**: content that ends up past an edge animates back over 500ms
//! - **Scrollbars**: one thumb per scrollable axis, shown while dragging
//! - **Taps**: a touch with no movement is re-issued as a click

use glide_core::events::{event_types, Event, EventData, EventType, TouchData, TransitionProperty};
use glide_core::fsm::{StateMachine, StateTransitions};
use glide_core::{Axis, Point, Size};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{ConfigError, LayoutError, Result};
use crate::render_state::TransitionTiming;
use crate::tree::LayoutNodeId;
use crate::widgets::scrollbar::{round_px, ScrollbarTrack};

use glide_animation::Easing;

/// Only the last stretch of a drag counts towards release velocity
pub const VELOCITY_WINDOW_MS: u64 = 250;

/// Duration of the snap back into bounds
pub const SETTLE_DURATION_MS: f32 = 500.0;

/// Duration used by [`ScrollSurface::scroll_to`] when none is given
pub const DEFAULT_SCROLL_DURATION_MS: f32 = 400.0;

/// Drag deltas past an edge are divided by this
pub const OVERSCROLL_DAMPING: f32 = 4.0;

/// Friction of the momentum model
pub const FRICTION: f32 = 0.1;

/// Deceleration of the momentum model
pub const DECELERATION: f32 = 1.5;

// ============================================================================
// Scroll Configuration
// ============================================================================

/// Configuration for scroll behavior
///
/// Missing fields fall back to their defaults and unknown fields are
/// ignored. The camel-case names used by older page configs are accepted as
/// aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Let content travel past its edges and spring back (default: true)
    #[serde(alias = "bounce")]
    pub bounce_enabled: bool,
    /// Refresh when the content subtree changes (default: true)
    #[serde(alias = "checkDOMChanges")]
    pub watch_dom_mutations: bool,
    /// Jump back to the top-left corner after a content change (default: false)
    #[serde(alias = "topOnDOMChanges")]
    pub reset_on_dom_mutation: bool,
    /// Show the horizontal indicator when content is wider than the viewport
    #[serde(alias = "hScrollBar")]
    pub show_horizontal_track: bool,
    /// Show the vertical indicator when content is taller than the viewport
    #[serde(alias = "vScrollBar")]
    pub show_vertical_track: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            bounce_enabled: true,
            watch_dom_mutations: true,
            reset_on_dom_mutation: false,
            show_horizontal_track: true,
            show_vertical_track: true,
        }
    }
}

impl ScrollConfig {
    /// Create config with bounce disabled
    pub fn no_bounce() -> Self {
        Self {
            bounce_enabled: false,
            ..Default::default()
        }
    }

    /// Create config without any scrollbar indicators
    pub fn no_tracks() -> Self {
        Self {
            show_horizontal_track: false,
            show_vertical_track: false,
            ..Default::default()
        }
    }

    pub fn from_json(source: &str) -> std::result::Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_toml(source: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn track_enabled(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.show_horizontal_track,
            Axis::Vertical => self.show_vertical_track,
        }
    }
}

// ============================================================================
// Gesture State
// ============================================================================

/// Internal events fed to the gesture state machine
pub mod scroll_events {
    use glide_core::events::EventType;

    /// Touch released without movement
    pub const TAP: EventType = 100;
    /// Touch released with momentum; an animation is in flight
    pub const FLING: EventType = 101;
    /// Content is heading for (or already at) its resting position
    pub const SETTLED: EventType = 102;
}

/// Gesture state of a scroll surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollState {
    /// No finger down, no momentum animation pending
    #[default]
    Idle,
    /// A single finger is moving the content
    Dragging,
    /// Momentum animation playing; settles when it ends
    Settling,
}

impl StateTransitions for ScrollState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        use scroll_events::*;
        match (self, event) {
            (_, TOUCH_START) => Some(ScrollState::Dragging),
            (ScrollState::Dragging, TAP) => Some(ScrollState::Idle),
            (ScrollState::Dragging, FLING) => Some(ScrollState::Settling),
            (ScrollState::Dragging | ScrollState::Settling, SETTLED) => Some(ScrollState::Idle),
            _ => None,
        }
    }
}

/// Snapshot taken when a finger lands; lives until it lifts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureStart {
    /// Offset at the start of the velocity window
    pub start_offset: Point,
    /// Most recent finger position (page coordinates)
    pub last_touch: Point,
    /// Time at the start of the velocity window
    pub start_time_ms: u64,
    /// Whether any move arrived since the finger landed
    pub moved: bool,
}

/// Projected glide after release
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Momentum {
    /// Signed distance to travel, whole pixels
    pub distance: f32,
    /// Duration of the glide, whole milliseconds
    pub time_ms: f32,
}

impl Momentum {
    pub const NONE: Momentum = Momentum {
        distance: 0.0,
        time_ms: 0.0,
    };
}

/// Project a glide from the distance covered during the velocity window
///
/// `upper` limits travel for positive distances and `lower` for negative
/// ones. When the unconstrained glide would pass the limit, speed and
/// distance are scaled down so the glide stops exactly on it.
pub fn momentum(distance: f32, elapsed_ms: f32, upper: f32, lower: f32) -> Momentum {
    if distance == 0.0 || elapsed_ms <= 0.0 {
        return Momentum::NONE;
    }

    let mut speed = distance.abs() / elapsed_ms * 1000.0;
    let mut projected = speed * speed / (20.0 * FRICTION) / 1000.0;

    let bound = if distance > 0.0 { upper } else { lower }.max(0.0);
    if projected > bound {
        speed = speed * bound / projected;
        projected = bound;
    }

    Momentum {
        distance: round_px(projected) * distance.signum(),
        time_ms: round_px(speed / DECELERATION),
    }
}

// ============================================================================
// Scroll Surface
// ============================================================================

/// A touch-scrollable content node inside a fixed-size viewport
#[derive(Debug)]
pub struct ScrollSurface {
    content: LayoutNodeId,
    viewport: LayoutNodeId,
    config: ScrollConfig,

    /// Current translation of the content (0,0 = top-left aligned)
    offset: Point,
    /// Most negative legal offset per axis
    max_offset: Point,
    /// Viewport client size at the last refresh
    viewport_size: Size,
    /// Content outer size at the last refresh
    content_size: Size,
    scrollable_x: bool,
    scrollable_y: bool,

    track_x: Option<ScrollbarTrack>,
    track_y: Option<ScrollbarTrack>,

    gesture: Option<GestureStart>,
    state: StateMachine<ScrollState>,
    /// Waiting for the content's transform transition to end
    awaiting_transition_end: bool,
    attached: bool,
}

impl ScrollSurface {
    /// Make `content` scrollable inside its parent
    pub fn new(doc: &mut Document, content: LayoutNodeId, config: ScrollConfig) -> Result<Self> {
        if !doc.contains(content) {
            return Err(LayoutError::UnknownNode(content));
        }
        let viewport = doc.parent(content).ok_or(LayoutError::NoViewport(content))?;

        let render = doc.render_mut();
        render.set_timing(
            content,
            TransitionTiming {
                transform_ms: 0.0,
                opacity_ms: 0.0,
                easing: Easing::DECELERATE,
            },
        );
        render.set_translate(content, Point::ZERO);

        let mut surface = Self {
            content,
            viewport,
            config,
            offset: Point::ZERO,
            max_offset: Point::ZERO,
            viewport_size: Size::ZERO,
            content_size: Size::ZERO,
            scrollable_x: false,
            scrollable_y: false,
            track_x: None,
            track_y: None,
            gesture: None,
            state: StateMachine::new(ScrollState::Idle),
            awaiting_transition_end: false,
            attached: true,
        };
        surface.refresh(doc)?;

        tracing::debug!(?content, ?viewport, ?config, "scroll surface attached");
        Ok(surface)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn content(&self) -> LayoutNodeId {
        self.content
    }

    pub fn viewport(&self) -> LayoutNodeId {
        self.viewport
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn max_offset(&self) -> Point {
        self.max_offset
    }

    pub fn is_scrollable(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.scrollable_x,
            Axis::Vertical => self.scrollable_y,
        }
    }

    pub fn track(&self, axis: Axis) -> Option<&ScrollbarTrack> {
        match axis {
            Axis::Horizontal => self.track_x.as_ref(),
            Axis::Vertical => self.track_y.as_ref(),
        }
    }

    fn track_slot(&mut self, axis: Axis) -> &mut Option<ScrollbarTrack> {
        match axis {
            Axis::Horizontal => &mut self.track_x,
            Axis::Vertical => &mut self.track_y,
        }
    }

    pub fn gesture(&self) -> Option<&GestureStart> {
        self.gesture.as_ref()
    }

    pub fn state(&self) -> ScrollState {
        self.state.current_state()
    }

    pub fn state_history(&self) -> &[(ScrollState, EventType, ScrollState)] {
        self.state.history()
    }

    pub fn is_awaiting_transition_end(&self) -> bool {
        self.awaiting_transition_end
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Re-measure viewport and content and bring offset and tracks in line
    pub fn refresh(&mut self, doc: &mut Document) -> Result<()> {
        self.viewport_size = doc.measure(self.viewport)?.client_size();
        self.content_size = doc.measure(self.content)?.size();
        self.max_offset = Point::new(
            self.viewport_size.width - self.content_size.width,
            self.viewport_size.height - self.content_size.height,
        );

        // Snap axes that were scrollable back into the new range
        let mut reset = self.offset;
        if self.scrollable_x {
            reset.x = snap_into_range(self.offset.x, self.max_offset.x);
        }
        if self.scrollable_y {
            reset.y = snap_into_range(self.offset.y, self.max_offset.y);
        }

        self.scrollable_x = self.content_size.width > self.viewport_size.width;
        self.scrollable_y = self.content_size.height > self.viewport_size.height;

        for axis in Axis::BOTH {
            self.reconcile_track(doc, axis)?;
        }

        if reset != self.offset {
            tracing::debug!(from = ?self.offset, to = ?reset, "offset out of range after refresh");
            self.snap_to(doc, reset);
        }

        tracing::debug!(
            viewport = ?self.viewport_size,
            content = ?self.content_size,
            max_offset = ?self.max_offset,
            scrollable_x = self.scrollable_x,
            scrollable_y = self.scrollable_y,
            "refresh"
        );
        Ok(())
    }

    /// A track exists exactly when its axis scrolls and the config asks for it
    fn reconcile_track(&mut self, doc: &mut Document, axis: Axis) -> Result<()> {
        let wanted = self.is_scrollable(axis) && self.config.track_enabled(axis);
        let viewport = self.viewport;
        let scroll_extent = self.viewport_size.along(axis);
        let content_extent = self.content_size.along(axis);
        let slot = self.track_slot(axis);

        if wanted {
            if slot.is_none() {
                *slot = Some(ScrollbarTrack::new(doc, axis, viewport)?);
            }
            if let Some(track) = slot.as_mut() {
                track.init(doc, scroll_extent, content_extent)?;
            }
        } else if let Some(track) = slot.take() {
            track.remove(doc)?;
        }
        Ok(())
    }

    /// Content changed: re-measure, and optionally jump back to the origin
    pub fn on_dom_mutated(&mut self, doc: &mut Document) -> Result<()> {
        self.refresh(doc)?;
        if self.config.reset_on_dom_mutation && self.offset != Point::ZERO {
            self.snap_to(doc, Point::ZERO);
        }
        Ok(())
    }

    /// Jump to an offset with no animation
    ///
    /// A glide cut short this way never reports its end, so a pending
    /// settle runs right here instead.
    fn snap_to(&mut self, doc: &mut Document, target: Point) {
        self.scroll_to(doc, target.x, target.y, Some(0.0));
        if self.awaiting_transition_end {
            self.awaiting_transition_end = false;
            self.settle(doc);
        }
    }

    // =========================================================================
    // Positioning
    // =========================================================================

    /// Apply an offset (`None` keeps an axis) and mirror it onto the tracks
    pub fn set_offset(&mut self, doc: &mut Document, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x {
            self.offset.x = x;
        }
        if let Some(y) = y {
            self.offset.y = y;
        }
        doc.render_mut().set_translate(self.content, self.offset);

        for axis in Axis::BOTH {
            if let Some(track) = self.track(axis) {
                let pos = self.thumb_position(track, axis, self.offset.along(axis));
                track.set_position(doc, pos);
            }
        }
    }

    /// Move to an offset over `duration_ms` (default 400ms, 0 = instant)
    pub fn scroll_to(&mut self, doc: &mut Document, x: f32, y: f32, duration_ms: Option<f32>) {
        let duration = duration_ms.unwrap_or(DEFAULT_SCROLL_DURATION_MS);
        doc.render_mut().set_transform_duration(self.content, duration);
        self.set_offset(doc, Some(x), Some(y));
    }

    /// Map a content offset onto a track's shorter range
    fn thumb_position(&self, track: &ScrollbarTrack, axis: Axis, offset: f32) -> f32 {
        // Tracks only exist on scrollable axes, so max_offset is negative here
        track.max_thumb_offset() / self.max_offset.along(axis) * offset
    }

    /// Nearest resting offset per axis
    fn rest_position(&self) -> Point {
        let rest = |offset: f32, max: f32| {
            if offset >= 0.0 {
                0.0
            } else if offset < max {
                max
            } else {
                offset
            }
        };
        Point::new(
            rest(self.offset.x, self.max_offset.x),
            rest(self.offset.y, self.max_offset.y),
        )
    }

    /// Animate back into bounds if needed and fade the tracks out
    pub fn settle(&mut self, doc: &mut Document) {
        let target = self.rest_position();

        if target != self.offset {
            for axis in Axis::BOTH {
                if target.along(axis) == self.offset.along(axis) {
                    continue;
                }
                if let Some(track) = self.track(axis) {
                    let pos = self.thumb_position(track, axis, target.along(axis));
                    track.scroll_to(doc, pos, SETTLE_DURATION_MS);
                }
            }
            tracing::debug!(from = ?self.offset, to = ?target, "settling");
            self.scroll_to(doc, target.x, target.y, Some(SETTLE_DURATION_MS));
        }

        for axis in Axis::BOTH {
            if let Some(track) = self.track_slot(axis).as_mut() {
                track.hide(doc);
            }
        }

        self.state.send(scroll_events::SETTLED);
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Feed one event to the surface
    ///
    /// Returns true if the surface acted on it. Touch starts it accepts are
    /// marked default-prevented and stop propagating.
    pub fn handle_event(&mut self, doc: &mut Document, event: &mut Event) -> Result<bool> {
        if !self.attached {
            return Ok(false);
        }

        let target = LayoutNodeId::from_raw(event.target);
        let on_content = doc.is_within(target, self.content);

        let handled = match (event.event_type, &event.data) {
            (event_types::TOUCH_START, EventData::Touch(touch)) if on_content => {
                self.on_touch_start(doc, touch, event.timestamp)
            }
            (event_types::TOUCH_MOVE, EventData::Touch(touch)) if on_content => {
                self.on_touch_move(doc, touch, event.timestamp)
            }
            (event_types::TOUCH_END, EventData::Touch(touch)) if on_content => {
                self.on_touch_end(doc, touch, event.timestamp)
            }
            (event_types::TOUCH_CANCEL, EventData::Touch(_)) if on_content => {
                self.on_touch_cancel(doc)
            }
            (
                event_types::TRANSITION_END,
                EventData::Transition {
                    property: TransitionProperty::Transform,
                    ..
                },
            ) if target == self.content => self.on_transition_end(doc),
            (event_types::ORIENTATION_CHANGE, _) => {
                self.refresh(doc)?;
                true
            }
            (event_types::SUBTREE_MODIFIED, _)
                if self.config.watch_dom_mutations && on_content =>
            {
                self.on_dom_mutated(doc)?;
                true
            }
            _ => false,
        };

        if handled && event.event_type == event_types::TOUCH_START {
            event.prevent_default();
            event.stop_propagation();
        }
        Ok(handled)
    }

    /// Drain the document's event queue into this surface
    pub fn process_pending(&mut self, doc: &mut Document) -> Result<usize> {
        let mut handled = 0;
        while let Some(mut event) = doc.poll_event() {
            if self.handle_event(doc, &mut event)? {
                handled += 1;
            }
        }
        Ok(handled)
    }

    fn on_touch_start(&mut self, doc: &mut Document, touch: &TouchData, now_ms: u64) -> bool {
        let [point] = touch.target_touches.as_slice() else {
            return false;
        };

        // Freeze any glide where it is on screen
        doc.render_mut().set_transform_duration(self.content, 0.0);
        for axis in Axis::BOTH {
            if let Some(track) = self.track(axis) {
                track.halt(doc);
            }
        }

        let rendered = doc.render().computed_translate(self.content);
        if rendered != self.offset {
            tracing::debug!(tracked = ?self.offset, ?rendered, "resync with rendered position");
            self.set_offset(doc, Some(rendered.x), Some(rendered.y));
        }

        self.gesture = Some(GestureStart {
            start_offset: self.offset,
            last_touch: point.page,
            start_time_ms: now_ms,
            moved: false,
        });
        self.awaiting_transition_end = false;
        self.state.send(event_types::TOUCH_START);
        true
    }

    /// Where a drag delta takes one axis, damped or clamped past the edges
    fn drag_to(&self, axis: Axis, delta: f32) -> f32 {
        let current = self.offset.along(axis);
        let max = self.max_offset.along(axis);
        let candidate = current + delta;

        if candidate > 0.0 || candidate < max {
            if self.config.bounce_enabled {
                round_px(current + delta / OVERSCROLL_DAMPING)
            } else {
                candidate.clamp(max.min(0.0), 0.0)
            }
        } else {
            candidate
        }
    }

    fn on_touch_move(&mut self, doc: &mut Document, touch: &TouchData, now_ms: u64) -> bool {
        let [point] = touch.target_touches.as_slice() else {
            return false;
        };
        let Some(mut gesture) = self.gesture else {
            return false;
        };

        let page = point.page;
        let delta_x = if self.scrollable_x {
            page.x - gesture.last_touch.x
        } else {
            0.0
        };
        let delta_y = if self.scrollable_y {
            page.y - gesture.last_touch.y
        } else {
            0.0
        };
        let new_x = self.drag_to(Axis::Horizontal, delta_x);
        let new_y = self.drag_to(Axis::Vertical, delta_y);

        for axis in Axis::BOTH {
            if let Some(track) = self.track_slot(axis).as_mut() {
                if !track.is_visible() {
                    track.show(doc);
                }
            }
        }

        self.set_offset(doc, Some(new_x), Some(new_y));
        tracing::trace!(delta_x, delta_y, offset = ?self.offset, "drag");

        gesture.last_touch = page;
        gesture.moved = true;
        if now_ms.saturating_sub(gesture.start_time_ms) > VELOCITY_WINDOW_MS {
            gesture.start_offset = self.offset;
            gesture.start_time_ms = now_ms;
        }
        self.gesture = Some(gesture);
        true
    }

    fn on_touch_end(&mut self, doc: &mut Document, touch: &TouchData, now_ms: u64) -> bool {
        if !touch.target_touches.is_empty() {
            return false;
        }
        let Some(gesture) = self.gesture.take() else {
            return false;
        };

        if !gesture.moved {
            self.synthesize_click(doc, touch, now_ms);
            self.state.send(scroll_events::TAP);
            // A tap can land while the content is still springing back
            if self.rest_position() != self.offset {
                self.settle(doc);
            }
            return true;
        }

        let elapsed = now_ms.saturating_sub(gesture.start_time_ms) as f32;
        let momentum_x = self.axis_momentum(Axis::Horizontal, &gesture, elapsed);
        let momentum_y = self.axis_momentum(Axis::Vertical, &gesture, elapsed);

        if momentum_x.distance == 0.0 && momentum_y.distance == 0.0 {
            self.settle(doc);
            return true;
        }

        let duration = momentum_x.time_ms.max(momentum_y.time_ms).max(1.0);
        let target = Point::new(
            self.offset.x + momentum_x.distance,
            self.offset.y + momentum_y.distance,
        );
        tracing::debug!(?momentum_x, ?momentum_y, ?target, duration, "fling");

        for axis in Axis::BOTH {
            if let Some(track) = self.track(axis) {
                let pos = self.thumb_position(track, axis, target.along(axis));
                track.scroll_to(doc, pos, duration);
            }
        }
        self.awaiting_transition_end = true;
        self.scroll_to(doc, target.x, target.y, Some(duration));
        self.state.send(scroll_events::FLING);
        true
    }

    fn axis_momentum(&self, axis: Axis, gesture: &GestureStart, elapsed_ms: f32) -> Momentum {
        if !self.is_scrollable(axis) {
            return Momentum::NONE;
        }
        let offset = self.offset.along(axis);
        let viewport = self.viewport_size.along(axis);
        let content = self.content_size.along(axis);
        let margin = if self.config.bounce_enabled {
            viewport / 4.0
        } else {
            0.0
        };
        momentum(
            offset - gesture.start_offset.along(axis),
            elapsed_ms,
            -offset + margin,
            offset + content - viewport + margin,
        )
    }

    fn on_touch_cancel(&mut self, doc: &mut Document) -> bool {
        if self.gesture.take().is_none() {
            return false;
        }
        self.settle(doc);
        true
    }

    fn on_transition_end(&mut self, doc: &mut Document) -> bool {
        if !self.awaiting_transition_end {
            return false;
        }
        self.awaiting_transition_end = false;
        self.settle(doc);
        true
    }

    /// Re-issue a tap as a click on the element under the finger
    fn synthesize_click(&self, doc: &mut Document, touch: &TouchData, now_ms: u64) {
        let Some(point) = touch.changed_touches.first() else {
            return;
        };
        let target = doc
            .element_for(LayoutNodeId::from_raw(point.target))
            .unwrap_or(self.content);

        let mut click = Event::new(
            event_types::CLICK,
            target.to_raw(),
            EventData::Click {
                screen: point.screen,
                client: point.client,
                button: 0,
                detail: touch.detail,
                modifiers: touch.modifiers,
            },
            now_ms,
        );
        let handlers = doc.dispatch(&mut click);
        tracing::debug!(?target, handlers, "tap re-issued as click");
    }

    /// Remove the tracks and stop reacting to events
    pub fn destroy(&mut self, doc: &mut Document) -> Result<()> {
        for axis in Axis::BOTH {
            if let Some(track) = self.track_slot(axis).take() {
                track.remove(doc)?;
            }
        }
        self.gesture = None;
        self.awaiting_transition_end = false;
        self.attached = false;
        tracing::debug!(content = ?self.content, "scroll surface detached");
        Ok(())
    }
}

/// Clamp an offset into `[max, 0]`, or to 0 when nothing scrolls
fn snap_into_range(offset: f32, max: f32) -> f32 {
    if max >= 0.0 {
        0.0
    } else if offset < max {
        max
    } else {
        offset
    }
}
