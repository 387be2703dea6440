//! Measured element geometry

use glide_core::{Axis, Size};
use taffy::Layout;

/// Computed layout bounds for an element after layout computation
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBounds {
    /// X position relative to parent
    pub x: f32,
    /// Y position relative to parent
    pub y: f32,
    /// Outer width, borders included
    pub width: f32,
    /// Outer height, borders included
    pub height: f32,
    /// Sum of left and right border widths
    pub border_x: f32,
    /// Sum of top and bottom border widths
    pub border_y: f32,
}

impl ElementBounds {
    /// Create bounds from a Taffy Layout
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            x: layout.location.x,
            y: layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
            border_x: layout.border.left + layout.border.right,
            border_y: layout.border.top + layout.border.bottom,
        }
    }

    /// Create borderless bounds
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            border_x: 0.0,
            border_y: 0.0,
        }
    }

    /// Outer size (offset size)
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Inner size without borders (client size)
    pub fn client_size(&self) -> Size {
        Size::new(
            (self.width - self.border_x).max(0.0),
            (self.height - self.border_y).max(0.0),
        )
    }

    /// Border width along an axis
    pub fn border_along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.border_x,
            Axis::Vertical => self.border_y,
        }
    }
}
