//! End-to-end gesture tests for the scroll surface

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use glide_core::events::{event_types, Event, EventData, Modifiers, TouchData, TouchPoint};
use glide_core::{Axis, Point, Size};
use glide_layout::prelude::*;
use glide_layout::LayoutError;

struct Fixture {
    doc: Document,
    viewport: LayoutNodeId,
    content: LayoutNodeId,
    surface: ScrollSurface,
}

impl Fixture {
    fn new(content_size: Size, config: ScrollConfig) -> Self {
        let mut doc = Document::new(Size::new(320.0, 480.0)).unwrap();
        let viewport = doc
            .create_element(doc.root(), LayoutStyle::viewport(320.0, 400.0))
            .unwrap();
        let content = doc
            .create_element(
                viewport,
                LayoutStyle::fixed_size(content_size.width, content_size.height),
            )
            .unwrap();
        let surface = ScrollSurface::new(&mut doc, content, config).unwrap();
        let mut fixture = Self {
            doc,
            viewport,
            content,
            surface,
        };
        fixture.pump();
        fixture
    }

    /// Tall content: 400px viewport over 1200px, max offset -800
    fn tall() -> Self {
        Self::new(Size::new(320.0, 1200.0), ScrollConfig::default())
    }

    fn pump(&mut self) -> usize {
        self.surface.process_pending(&mut self.doc).unwrap()
    }

    fn touch(&mut self, event_type: u32, x: f32, y: f32) {
        self.touch_on(self.content, event_type, x, y);
    }

    fn touch_on(&mut self, target: LayoutNodeId, event_type: u32, x: f32, y: f32) {
        self.doc
            .push_touch(event_type, TouchPoint::at(0, x, y, target.to_raw()));
        self.pump();
    }

    fn wait(&mut self, ms: u64) {
        self.doc.advance_clock(ms);
    }

    /// Play frames until every transition has ended
    fn run_animations(&mut self) {
        for _ in 0..200 {
            self.doc.tick(16);
            self.pump();
            if !self.doc.render().is_animating() {
                break;
            }
        }
        assert!(!self.doc.render().is_animating(), "animations never finished");
    }

    fn rendered(&self) -> Point {
        self.doc.render().computed_translate(self.content)
    }
}

#[test]
fn test_drag_moves_content_with_finger() {
    let mut f = Fixture::tall();

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.wait(16);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);

    assert_eq!(f.surface.offset(), Point::new(0.0, -100.0));
    assert_eq!(f.rendered(), Point::new(0.0, -100.0));
    assert_eq!(f.surface.state(), ScrollState::Dragging);

    let track = f.surface.track(Axis::Vertical).unwrap();
    assert!(track.is_visible());
    // Thumb mirrors the offset on its shorter range
    let expected = (track.max_thumb_offset() / -800.0 * -100.0 + 0.5).floor();
    assert_eq!(
        f.doc.render().computed_translate(track.bar()),
        Point::new(0.0, expected)
    );
}

#[test]
fn test_half_visible_content() {
    let mut doc = Document::new(Size::new(320.0, 600.0)).unwrap();
    let viewport = doc
        .create_element(doc.root(), LayoutStyle::viewport(320.0, 500.0))
        .unwrap();
    let content = doc
        .create_element(viewport, LayoutStyle::fixed_size(320.0, 1000.0))
        .unwrap();
    let mut surface = ScrollSurface::new(&mut doc, content, ScrollConfig::default()).unwrap();
    assert_eq!(surface.max_offset().y, -500.0);

    doc.push_touch(event_types::TOUCH_START, TouchPoint::at(0, 50.0, 400.0, content.to_raw()));
    doc.push_touch(event_types::TOUCH_MOVE, TouchPoint::at(0, 50.0, 300.0, content.to_raw()));
    surface.process_pending(&mut doc).unwrap();
    assert_eq!(surface.offset().y, -100.0);

    let track = surface.track(Axis::Vertical).unwrap();
    assert_eq!(track.track_extent(), 492.0);
    assert!(track.max_thumb_offset() >= 0.0);
}

#[test]
fn test_drag_past_edge_is_damped() {
    // 400px viewport over 900px content: max offset -500
    let mut f = Fixture::new(Size::new(320.0, 900.0), ScrollConfig::default());
    f.surface.scroll_to(&mut f.doc, 0.0, -480.0, Some(0.0));

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.touch(event_types::TOUCH_MOVE, 100.0, 260.0);
    assert_eq!(f.surface.offset().y, -490.0);

    // Pulling down past the top moves a quarter of the finger distance
    f.surface.scroll_to(&mut f.doc, 0.0, 0.0, Some(0.0));
    f.touch(event_types::TOUCH_MOVE, 100.0, 360.0);
    assert_eq!(f.surface.offset().y, 25.0);
}

#[test]
fn test_drag_without_bounce_stops_at_edge() {
    let mut f = Fixture::new(Size::new(320.0, 1200.0), ScrollConfig::no_bounce());

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.touch(event_types::TOUCH_MOVE, 100.0, 350.0);
    assert_eq!(f.surface.offset().y, 0.0);

    f.touch(event_types::TOUCH_MOVE, 100.0, -700.0);
    assert_eq!(f.surface.offset().y, -800.0);
}

#[test]
fn test_axis_that_fits_does_not_move() {
    let mut f = Fixture::tall();
    assert!(!f.surface.is_scrollable(Axis::Horizontal));
    assert!(f.surface.track(Axis::Horizontal).is_none());

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.touch(event_types::TOUCH_MOVE, 20.0, 250.0);
    assert_eq!(f.surface.offset(), Point::new(0.0, -50.0));
}

#[test]
fn test_both_axes_get_tracks() {
    let f = Fixture::new(Size::new(640.0, 1200.0), ScrollConfig::default());
    assert_eq!(f.surface.max_offset(), Point::new(-320.0, -800.0));

    let horizontal = f.surface.track(Axis::Horizontal).unwrap();
    let vertical = f.surface.track(Axis::Vertical).unwrap();
    assert_eq!(f.doc.parent(horizontal.bar()), Some(f.viewport));
    assert_eq!(f.doc.parent(vertical.bar()), Some(f.viewport));
    assert_eq!(horizontal.track_extent(), 312.0);
    assert_eq!(vertical.track_extent(), 392.0);
}

#[test]
fn test_disabled_tracks_are_not_created() {
    let f = Fixture::new(Size::new(640.0, 1200.0), ScrollConfig::no_tracks());
    assert!(f.surface.track(Axis::Horizontal).is_none());
    assert!(f.surface.track(Axis::Vertical).is_none());
    assert!(f.surface.is_scrollable(Axis::Vertical));
}

#[test]
fn test_tap_is_reissued_as_click() {
    let mut f = Fixture::tall();
    let item = f
        .doc
        .create_element(f.content, LayoutStyle::fixed_size(320.0, 40.0))
        .unwrap();
    let label = f
        .doc
        .create_text(item, LayoutStyle::fixed_size(100.0, 20.0))
        .unwrap();
    f.pump();

    let clicks = Arc::new(AtomicUsize::new(0));
    let seen = clicks.clone();
    f.doc
        .dispatcher_mut()
        .register(item.to_raw(), event_types::CLICK, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

    f.touch_on(label, event_types::TOUCH_START, 50.0, 10.0);
    f.wait(80);
    f.touch_on(label, event_types::TOUCH_END, 50.0, 10.0);

    assert_eq!(clicks.load(Ordering::SeqCst), 1);
    assert_eq!(f.doc.dispatched(event_types::CLICK), 1);
    assert_eq!(f.surface.offset(), Point::ZERO);
    assert!(!f.doc.render().is_animating());
    assert_eq!(f.surface.state(), ScrollState::Idle);
}

#[test]
fn test_fling_comes_to_rest_in_bounds() {
    let mut f = Fixture::tall();

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.wait(50);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    f.wait(50);
    f.touch(event_types::TOUCH_MOVE, 100.0, 100.0);
    f.touch(event_types::TOUCH_END, 100.0, 100.0);

    // 200px in 100ms projects far past the end; capped a quarter viewport beyond it
    assert_eq!(f.surface.offset().y, -900.0);
    assert_eq!(f.surface.state(), ScrollState::Settling);
    assert!(f.surface.is_awaiting_transition_end());

    f.run_animations();

    assert_eq!(f.surface.offset(), Point::new(0.0, -800.0));
    assert_eq!(f.rendered(), Point::new(0.0, -800.0));
    assert_eq!(f.surface.state(), ScrollState::Idle);
    assert!(!f.surface.track(Axis::Vertical).unwrap().is_visible());
}

#[test]
fn test_slow_release_settles_immediately() {
    let mut f = Fixture::tall();

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.wait(20);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    // Finger rests long enough for the velocity window to restart
    f.wait(400);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    f.touch(event_types::TOUCH_END, 100.0, 200.0);

    assert_eq!(f.surface.offset().y, -100.0);
    assert_eq!(f.surface.state(), ScrollState::Idle);
    assert!(!f.surface.is_awaiting_transition_end());
}

#[test]
fn test_release_past_top_bounces_back() {
    let mut f = Fixture::tall();

    f.touch(event_types::TOUCH_START, 100.0, 100.0);
    f.wait(300);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    assert_eq!(f.surface.offset().y, 25.0);
    f.touch(event_types::TOUCH_END, 100.0, 200.0);

    f.run_animations();
    assert_eq!(f.rendered(), Point::ZERO);
    assert_eq!(f.surface.offset(), Point::ZERO);
}

#[test]
fn test_settle_is_idempotent() {
    let mut f = Fixture::tall();
    f.touch(event_types::TOUCH_START, 100.0, 100.0);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    assert_eq!(f.surface.offset().y, 25.0);

    f.surface.settle(&mut f.doc);
    f.surface.settle(&mut f.doc);
    assert_eq!(f.surface.offset(), Point::ZERO);

    f.run_animations();
    assert_eq!(f.rendered(), Point::ZERO);

    f.surface.settle(&mut f.doc);
    assert!(!f.doc.render().is_node_animating(f.content));
}

#[test]
fn test_touch_cancel_settles_without_click() {
    let mut f = Fixture::tall();
    f.touch(event_types::TOUCH_START, 100.0, 100.0);
    f.touch(event_types::TOUCH_CANCEL, 100.0, 100.0);

    assert_eq!(f.doc.dispatched(event_types::CLICK), 0);
    assert!(f.surface.gesture().is_none());
    assert_eq!(f.surface.state(), ScrollState::Idle);
}

#[test]
fn test_touch_start_interrupts_fling() {
    let mut f = Fixture::tall();

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.wait(50);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    f.wait(50);
    f.touch(event_types::TOUCH_MOVE, 100.0, 100.0);
    f.touch(event_types::TOUCH_END, 100.0, 100.0);

    for _ in 0..6 {
        f.doc.tick(16);
        f.pump();
    }
    let mid_flight = f.rendered();
    assert!(mid_flight.y < -200.0 && mid_flight.y > -900.0);

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    assert_eq!(f.surface.offset(), mid_flight);
    assert_eq!(f.rendered(), mid_flight);
    assert!(!f.doc.render().is_node_animating(f.content));
    assert!(!f.surface.is_awaiting_transition_end());

    // The stopped glide never reports an end
    for _ in 0..60 {
        f.doc.tick(16);
        f.pump();
    }
    assert_eq!(f.surface.state(), ScrollState::Dragging);
    assert_eq!(f.rendered(), mid_flight);
}

#[test]
fn test_multi_touch_is_ignored() {
    let mut f = Fixture::tall();
    let target = f.content.to_raw();
    let mut data = TouchData::single(TouchPoint::at(0, 100.0, 300.0, target));
    data.target_touches.push(TouchPoint::at(1, 150.0, 300.0, target));
    data.touches = data.target_touches.clone();

    let mut event = Event::new(event_types::TOUCH_START, target, EventData::Touch(data), 0);
    let handled = f.surface.handle_event(&mut f.doc, &mut event).unwrap();

    assert!(!handled);
    assert!(!event.default_prevented);
    assert!(f.surface.gesture().is_none());
    assert_eq!(f.surface.state(), ScrollState::Idle);
}

#[test]
fn test_accepted_touch_start_is_consumed() {
    let mut f = Fixture::tall();
    let target = f.content.to_raw();
    let data = TouchData::single(TouchPoint::at(0, 100.0, 300.0, target));
    let mut event = Event::new(event_types::TOUCH_START, target, EventData::Touch(data), 0);

    assert!(f.surface.handle_event(&mut f.doc, &mut event).unwrap());
    assert!(event.default_prevented);
    assert!(event.propagation_stopped);
}

#[test]
fn test_touches_outside_content_are_ignored() {
    let mut f = Fixture::tall();
    let outside = f
        .doc
        .create_element(f.doc.root(), LayoutStyle::fixed_size(320.0, 80.0))
        .unwrap();
    f.pump();

    f.touch_on(outside, event_types::TOUCH_START, 10.0, 450.0);
    assert!(f.surface.gesture().is_none());
}

#[test]
fn test_shrinking_content_removes_track_and_snaps_back() {
    let mut f = Fixture::tall();
    f.surface.scroll_to(&mut f.doc, 0.0, -100.0, Some(0.0));
    let bar = f.surface.track(Axis::Vertical).unwrap().bar();

    f.doc.set_size(f.content, Size::new(320.0, 300.0)).unwrap();
    f.pump();

    assert!(!f.surface.is_scrollable(Axis::Vertical));
    assert!(f.surface.track(Axis::Vertical).is_none());
    assert!(!f.doc.contains(bar));
    assert_eq!(f.surface.offset(), Point::ZERO);
    assert_eq!(f.rendered(), Point::ZERO);
}

#[test]
fn test_growing_content_adds_track() {
    let mut f = Fixture::new(Size::new(320.0, 300.0), ScrollConfig::default());
    assert!(f.surface.track(Axis::Vertical).is_none());

    f.doc.set_size(f.content, Size::new(320.0, 1000.0)).unwrap();
    f.pump();

    assert!(f.surface.is_scrollable(Axis::Vertical));
    assert_eq!(f.surface.max_offset().y, -600.0);
    assert!(f.surface.track(Axis::Vertical).is_some());
}

#[test]
fn test_content_change_keeps_offset_in_range() {
    let mut f = Fixture::tall();
    f.surface.scroll_to(&mut f.doc, 0.0, -700.0, Some(0.0));

    f.doc.set_size(f.content, Size::new(320.0, 900.0)).unwrap();
    f.pump();

    assert_eq!(f.surface.offset().y, -500.0);
}

#[test]
fn test_reset_on_dom_mutation() {
    let config = ScrollConfig {
        reset_on_dom_mutation: true,
        ..ScrollConfig::default()
    };
    let mut f = Fixture::new(Size::new(320.0, 1200.0), config);
    f.surface.scroll_to(&mut f.doc, 0.0, -300.0, Some(0.0));

    f.doc
        .create_element(f.content, LayoutStyle::fixed_size(320.0, 40.0))
        .unwrap();
    f.pump();

    assert_eq!(f.surface.offset(), Point::ZERO);
    assert_eq!(f.rendered(), Point::ZERO);
}

#[test]
fn test_unwatched_mutations_are_ignored() {
    let config = ScrollConfig {
        watch_dom_mutations: false,
        ..ScrollConfig::default()
    };
    let mut f = Fixture::new(Size::new(320.0, 1200.0), config);

    f.doc.set_size(f.content, Size::new(320.0, 300.0)).unwrap();
    f.pump();
    assert!(f.surface.is_scrollable(Axis::Vertical));

    // An explicit refresh still picks the change up
    f.surface.refresh(&mut f.doc).unwrap();
    assert!(!f.surface.is_scrollable(Axis::Vertical));
}

#[test]
fn test_orientation_change_refreshes() {
    let mut f = Fixture::tall();
    f.doc.set_size(f.viewport, Size::new(480.0, 260.0)).unwrap();
    f.pump();
    assert_eq!(f.surface.max_offset().y, -800.0);

    f.doc.set_window(Size::new(480.0, 320.0)).unwrap();
    f.pump();

    assert_eq!(f.surface.max_offset().y, -940.0);
    assert!(!f.surface.is_scrollable(Axis::Horizontal));
    assert_eq!(
        f.surface.track(Axis::Vertical).unwrap().track_extent(),
        252.0
    );
}

#[test]
fn test_scroll_to_animates() {
    let mut f = Fixture::tall();
    f.surface.scroll_to(&mut f.doc, 0.0, -300.0, None);

    assert_eq!(f.surface.offset().y, -300.0);
    assert!(f.doc.render().is_node_animating(f.content));

    f.run_animations();
    assert_eq!(f.rendered(), Point::new(0.0, -300.0));
    // Not a fling, so the end of the animation changes nothing
    assert_eq!(f.surface.offset().y, -300.0);
}

#[test]
fn test_destroy_detaches() {
    let mut f = Fixture::tall();
    let bar = f.surface.track(Axis::Vertical).unwrap().bar();

    f.surface.destroy(&mut f.doc).unwrap();
    assert!(!f.surface.is_attached());
    assert!(!f.doc.contains(bar));

    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    assert_eq!(f.surface.offset(), Point::ZERO);
}

#[test]
fn test_new_requires_viewport() {
    let mut doc = Document::new(Size::new(320.0, 480.0)).unwrap();
    let root = doc.root();
    let err = ScrollSurface::new(&mut doc, root, ScrollConfig::default()).unwrap_err();
    assert!(matches!(err, LayoutError::NoViewport(node) if node == root));

    let orphan = doc
        .create_element(root, LayoutStyle::fixed_size(10.0, 10.0))
        .unwrap();
    doc.remove_node(orphan).unwrap();
    let err = ScrollSurface::new(&mut doc, orphan, ScrollConfig::default()).unwrap_err();
    assert!(matches!(err, LayoutError::UnknownNode(_)));
}

/// Drag 200px in 100ms and let go: glides towards -900, past the end
fn fling_past_end(f: &mut Fixture) {
    f.touch(event_types::TOUCH_START, 100.0, 300.0);
    f.wait(50);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    f.wait(50);
    f.touch(event_types::TOUCH_MOVE, 100.0, 100.0);
    f.touch(event_types::TOUCH_END, 100.0, 100.0);
    assert_eq!(f.surface.offset().y, -900.0);
}

#[test]
fn test_content_change_mid_fling_still_settles() {
    let mut f = Fixture::tall();
    fling_past_end(&mut f);
    for _ in 0..3 {
        f.doc.tick(16);
        f.pump();
    }

    // Refresh snaps the out-of-range glide target and cuts the glide short
    f.doc
        .create_element(f.content, LayoutStyle::fixed_size(10.0, 10.0))
        .unwrap();
    f.pump();
    f.run_animations();

    assert_eq!(f.surface.offset(), Point::new(0.0, -800.0));
    assert_eq!(f.rendered(), Point::new(0.0, -800.0));
    assert_eq!(f.surface.state(), ScrollState::Idle);
    assert!(!f.surface.is_awaiting_transition_end());
    assert!(!f.surface.track(Axis::Vertical).unwrap().is_visible());
}

#[test]
fn test_rotation_mid_fling_still_settles() {
    let mut f = Fixture::tall();
    fling_past_end(&mut f);
    f.doc.tick(16);
    f.pump();

    f.doc.set_window(Size::new(480.0, 320.0)).unwrap();
    f.pump();
    f.run_animations();

    assert_eq!(f.surface.state(), ScrollState::Idle);
    assert_eq!(f.rendered(), Point::new(0.0, -800.0));
    assert!(!f.surface.track(Axis::Vertical).unwrap().is_visible());
}

#[test]
fn test_tap_during_bounce_back_finishes_settling() {
    let mut f = Fixture::tall();
    f.touch(event_types::TOUCH_START, 100.0, 100.0);
    f.wait(300);
    f.touch(event_types::TOUCH_MOVE, 100.0, 200.0);
    f.touch(event_types::TOUCH_END, 100.0, 200.0);
    for _ in 0..3 {
        f.doc.tick(16);
        f.pump();
    }
    let caught = f.rendered().y;
    assert!(caught > 0.0 && caught < 25.0);

    f.touch(event_types::TOUCH_START, 100.0, 150.0);
    f.touch(event_types::TOUCH_END, 100.0, 150.0);

    assert_eq!(f.doc.dispatched(event_types::CLICK), 1);
    assert_eq!(f.surface.state(), ScrollState::Idle);
    assert!(f.doc.render().is_node_animating(f.content));

    f.run_animations();
    assert_eq!(f.rendered(), Point::ZERO);
    assert_eq!(f.surface.offset(), Point::ZERO);
}

#[test]
fn test_release_from_deep_overscroll_springs_back() {
    let mut f = Fixture::tall();
    f.touch(event_types::TOUCH_START, 100.0, 0.0);
    f.wait(50);
    f.touch(event_types::TOUCH_MOVE, 100.0, 800.0);
    // Past the quarter-viewport margin (100px)
    assert_eq!(f.surface.offset().y, 200.0);

    f.touch(event_types::TOUCH_END, 100.0, 800.0);

    // No glide beyond the margin; straight into the 500ms settle
    assert!(!f.surface.is_awaiting_transition_end());
    assert_eq!(f.surface.state(), ScrollState::Idle);
    assert_eq!(f.surface.offset(), Point::ZERO);

    f.run_animations();
    assert_eq!(f.rendered(), Point::ZERO);
}

#[test]
fn test_click_carries_touch_modifiers() {
    let mut f = Fixture::tall();
    let shifted = Arc::new(AtomicUsize::new(0));
    let seen = shifted.clone();
    f.doc
        .dispatcher_mut()
        .register(f.content.to_raw(), event_types::CLICK, move |event| {
            if let EventData::Click { modifiers, .. } = &event.data {
                if modifiers.shift && !modifiers.ctrl {
                    seen.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

    let target = f.content.to_raw();
    let point = TouchPoint::at(0, 40.0, 40.0, target);
    let mut start = Event::new(
        event_types::TOUCH_START,
        target,
        EventData::Touch(TouchData::single(point)),
        0,
    );
    assert!(f.surface.handle_event(&mut f.doc, &mut start).unwrap());

    let mut released = TouchData::released(point);
    released.modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    let mut end = Event::new(event_types::TOUCH_END, target, EventData::Touch(released), 60);
    assert!(f.surface.handle_event(&mut f.doc, &mut end).unwrap());

    assert_eq!(shifted.load(Ordering::SeqCst), 1);
}
