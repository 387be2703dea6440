//! Layout style helpers

use glide_core::Axis;
use taffy::geometry::Point as TaffyPoint;
use taffy::prelude::*;
use taffy::style::Overflow;

/// Cross-axis thickness of a scrollbar indicator, borders included
pub const SCROLLBAR_THICKNESS: f32 = 7.0;
/// Border width drawn around a scrollbar indicator
pub const SCROLLBAR_BORDER: f32 = 1.0;
/// Gap between the viewport edge and the start of a scrollbar track
pub const SCROLLBAR_INSET: f32 = 4.0;

/// Helper to create common layout styles
pub struct LayoutStyle;

impl LayoutStyle {
    /// Create a fixed size style
    pub fn fixed_size(width: f32, height: f32) -> Style {
        Style {
            size: Size {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            ..Default::default()
        }
    }

    /// Root window: block container of a fixed size
    pub fn window(width: f32, height: f32) -> Style {
        Style {
            display: Display::Block,
            ..Self::fixed_size(width, height)
        }
    }

    /// Clipping block container that hosts scrollable content
    ///
    /// Block layout keeps oversized children at their own size, which is
    /// what a scroll viewport needs.
    pub fn viewport(width: f32, height: f32) -> Style {
        Style {
            display: Display::Block,
            position: Position::Relative,
            overflow: TaffyPoint {
                x: Overflow::Hidden,
                y: Overflow::Hidden,
            },
            ..Self::fixed_size(width, height)
        }
    }

    /// Scrollbar indicator, positioned out of flow along one viewport edge
    pub fn scrollbar(axis: Axis) -> Style {
        let border = LengthPercentage::Length(SCROLLBAR_BORDER);
        let (size, inset) = match axis {
            Axis::Horizontal => (
                Size {
                    width: Dimension::Length(0.0),
                    height: Dimension::Length(SCROLLBAR_THICKNESS),
                },
                Rect {
                    left: LengthPercentageAuto::Length(SCROLLBAR_INSET),
                    right: LengthPercentageAuto::Auto,
                    top: LengthPercentageAuto::Auto,
                    bottom: LengthPercentageAuto::Length(1.0),
                },
            ),
            Axis::Vertical => (
                Size {
                    width: Dimension::Length(SCROLLBAR_THICKNESS),
                    height: Dimension::Length(0.0),
                },
                Rect {
                    left: LengthPercentageAuto::Auto,
                    right: LengthPercentageAuto::Length(1.0),
                    top: LengthPercentageAuto::Length(SCROLLBAR_INSET),
                    bottom: LengthPercentageAuto::Auto,
                },
            ),
        };
        Style {
            position: Position::Absolute,
            size,
            inset,
            border: Rect {
                left: border,
                right: border,
                top: border,
                bottom: border,
            },
            ..Default::default()
        }
    }

    /// Copy of `style` with its length along `axis` replaced
    pub fn with_length(style: &Style, axis: Axis, length: f32) -> Style {
        let mut style = style.clone();
        match axis {
            Axis::Horizontal => style.size.width = Dimension::Length(length),
            Axis::Vertical => style.size.height = Dimension::Length(length),
        }
        style
    }
}
