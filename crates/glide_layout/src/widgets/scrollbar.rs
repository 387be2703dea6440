//! Scrollbar track widget
//!
//! A thin indicator appended to a scroll viewport. Its length reflects how
//! much of the content is visible and its position mirrors the content
//! offset. It knows nothing about touches or physics; the owning
//! [`ScrollSurface`](super::scroll::ScrollSurface) drives it.

use glide_animation::Easing;
use glide_core::{Axis, Point};

use crate::document::Document;
use crate::error::Result;
use crate::render_state::TransitionTiming;
use crate::style::LayoutStyle;
use crate::tree::LayoutNodeId;

/// Space kept free at both ends of the track (distance from top + distance from bottom)
pub const TRACK_MARGIN: f32 = 8.0;

/// Opacity fade used for show/hide
pub const FADE_MS: f32 = 300.0;

/// Opacity fade while a finger is down
pub const TOUCH_FADE_MS: f32 = 250.0;

/// A single-axis scroll indicator
#[derive(Debug)]
pub struct ScrollbarTrack {
    axis: Axis,
    bar: LayoutNodeId,
    /// Bar borders along the axis (outer minus client extent)
    border_offset: f32,
    track_extent: f32,
    thumb_extent: f32,
    max_thumb_offset: f32,
    visible: bool,
}

impl ScrollbarTrack {
    /// Create the indicator and append it to the viewport, hidden
    pub fn new(doc: &mut Document, axis: Axis, viewport: LayoutNodeId) -> Result<Self> {
        let bar = doc.create_element(viewport, LayoutStyle::scrollbar(axis))?;

        let render = doc.render_mut();
        render.set_translate(bar, Point::ZERO);
        render.set_opacity(bar, 0.0);
        render.set_timing(
            bar,
            TransitionTiming {
                transform_ms: 0.0,
                opacity_ms: FADE_MS,
                easing: Easing::DECELERATE,
            },
        );

        let border_offset = doc.measure(bar)?.border_along(axis);
        tracing::debug!(axis = axis.name(), ?bar, "scrollbar created");

        Ok(Self {
            axis,
            bar,
            border_offset,
            track_extent: 0.0,
            thumb_extent: 0.0,
            max_thumb_offset: 0.0,
            visible: false,
        })
    }

    /// Recompute geometry for a viewport extent and content extent
    pub fn init(&mut self, doc: &mut Document, scroll_extent: f32, content_extent: f32) -> Result<()> {
        self.track_extent = scroll_extent - TRACK_MARGIN;
        self.thumb_extent = if content_extent > 0.0 {
            round_px(self.track_extent * self.track_extent / content_extent) + self.border_offset
        } else {
            self.track_extent
        };
        self.max_thumb_offset = (self.track_extent - self.thumb_extent).max(0.0);

        // Taffy sizes are border-box, so the style length is the full thumb
        doc.set_length(self.bar, self.axis, self.thumb_extent)?;

        tracing::debug!(
            axis = self.axis.name(),
            track = self.track_extent,
            thumb = self.thumb_extent,
            max = self.max_thumb_offset,
            "scrollbar init"
        );
        Ok(())
    }

    /// Move the thumb, clamped into the track
    pub fn set_position(&self, doc: &mut Document, pos: f32) {
        let pos = round_px(self.clamp(pos));
        let translate = match self.axis {
            Axis::Horizontal => Point::new(pos, 0.0),
            Axis::Vertical => Point::new(0.0, pos),
        };
        doc.render_mut().set_translate(self.bar, translate);
    }

    /// Move the thumb over `duration_ms`
    pub fn scroll_to(&self, doc: &mut Document, pos: f32, duration_ms: f32) {
        self.set_timing(doc, duration_ms, FADE_MS);
        self.set_position(doc, pos);
    }

    /// Stop thumb motion immediately; used when a finger lands
    pub fn halt(&self, doc: &mut Document) {
        self.set_timing(doc, 0.0, TOUCH_FADE_MS);
    }

    pub fn show(&mut self, doc: &mut Document) {
        self.visible = true;
        doc.render_mut().set_opacity(self.bar, 1.0);
    }

    pub fn hide(&mut self, doc: &mut Document) {
        self.visible = false;
        doc.render_mut().set_opacity(self.bar, 0.0);
    }

    /// Detach the indicator from the viewport. The track is gone afterwards.
    pub fn remove(self, doc: &mut Document) -> Result<()> {
        tracing::debug!(axis = self.axis.name(), bar = ?self.bar, "scrollbar removed");
        doc.remove_node(self.bar)
    }

    fn set_timing(&self, doc: &mut Document, transform_ms: f32, opacity_ms: f32) {
        doc.render_mut().set_timing(
            self.bar,
            TransitionTiming {
                transform_ms,
                opacity_ms,
                easing: Easing::DECELERATE,
            },
        );
    }

    pub fn clamp(&self, pos: f32) -> f32 {
        pos.clamp(0.0, self.max_thumb_offset)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn bar(&self) -> LayoutNodeId {
        self.bar
    }

    pub fn track_extent(&self) -> f32 {
        self.track_extent
    }

    pub fn thumb_extent(&self) -> f32 {
        self.thumb_extent
    }

    pub fn max_thumb_offset(&self) -> f32 {
        self.max_thumb_offset
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Round half up, the way browsers round pixel values
pub(crate) fn round_px(value: f32) -> f32 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::SCROLLBAR_BORDER;
    use glide_core::Size;

    fn setup() -> (Document, LayoutNodeId) {
        let mut doc = Document::new(Size::new(320.0, 480.0)).unwrap();
        let viewport = doc
            .create_element(doc.root(), LayoutStyle::viewport(320.0, 500.0))
            .unwrap();
        (doc, viewport)
    }

    #[test]
    fn test_new_track_is_hidden_child_of_viewport() {
        let (mut doc, viewport) = setup();
        let track = ScrollbarTrack::new(&mut doc, Axis::Vertical, viewport).unwrap();

        assert_eq!(doc.parent(track.bar()), Some(viewport));
        assert!(!track.is_visible());
        assert_eq!(doc.render().computed_opacity(track.bar()), 0.0);
    }

    #[test]
    fn test_init_geometry() {
        let (mut doc, viewport) = setup();
        let mut track = ScrollbarTrack::new(&mut doc, Axis::Vertical, viewport).unwrap();
        track.init(&mut doc, 500.0, 1000.0).unwrap();

        let borders = 2.0 * SCROLLBAR_BORDER;
        assert_eq!(track.track_extent(), 492.0);
        // round(492² / 1000) = round(242.064) = 242
        assert_eq!(track.thumb_extent(), 242.0 + borders);
        assert_eq!(track.max_thumb_offset(), 492.0 - 242.0 - borders);
        assert_eq!(doc.measure(track.bar()).unwrap().height, track.thumb_extent());
    }

    #[test]
    fn test_set_position_is_clamped() {
        let (mut doc, viewport) = setup();
        let mut track = ScrollbarTrack::new(&mut doc, Axis::Horizontal, viewport).unwrap();
        track.init(&mut doc, 320.0, 640.0).unwrap();
        let max = track.max_thumb_offset();
        assert!(max >= 0.0);

        track.set_position(&mut doc, -20.0);
        assert_eq!(doc.render().computed_translate(track.bar()), Point::ZERO);

        track.set_position(&mut doc, max + 50.0);
        assert_eq!(
            doc.render().computed_translate(track.bar()),
            Point::new(max, 0.0)
        );

        track.set_position(&mut doc, 10.4);
        assert_eq!(
            doc.render().computed_translate(track.bar()),
            Point::new(10.0, 0.0)
        );
    }

    #[test]
    fn test_max_thumb_offset_never_negative() {
        let (mut doc, viewport) = setup();
        let mut track = ScrollbarTrack::new(&mut doc, Axis::Vertical, viewport).unwrap();
        // Content barely larger than the track: thumb would outgrow it
        track.init(&mut doc, 500.0, 493.0).unwrap();
        assert!(track.max_thumb_offset() >= 0.0);
    }

    #[test]
    fn test_scroll_to_animates_thumb() {
        let (mut doc, viewport) = setup();
        let mut track = ScrollbarTrack::new(&mut doc, Axis::Vertical, viewport).unwrap();
        track.init(&mut doc, 500.0, 1000.0).unwrap();

        track.scroll_to(&mut doc, 100.0, 200.0);
        assert_eq!(doc.render().timing(track.bar()).transform_ms, 200.0);
        assert!(doc.render().is_node_animating(track.bar()));

        doc.tick(200);
        assert_eq!(
            doc.render().computed_translate(track.bar()),
            Point::new(0.0, 100.0)
        );
    }

    #[test]
    fn test_show_hide_and_remove() {
        let (mut doc, viewport) = setup();
        let mut track = ScrollbarTrack::new(&mut doc, Axis::Vertical, viewport).unwrap();

        track.show(&mut doc);
        assert!(track.is_visible());
        doc.tick(300);
        assert_eq!(doc.render().computed_opacity(track.bar()), 1.0);

        track.hide(&mut doc);
        assert!(!track.is_visible());

        let bar = track.bar();
        track.remove(&mut doc).unwrap();
        assert!(!doc.contains(bar));
        assert!(doc.render().get(bar).is_none());
    }
}
