//! Glide Layout Engine
//!
//! Box layout powered by Taffy, a headless document to host it, and the
//! touch scroll widgets that run on top.

pub mod document;
pub mod element;
pub mod error;
pub mod render_state;
pub mod style;
pub mod tree;
pub mod widgets;

pub use document::{Document, NodeKind};
pub use element::ElementBounds;
pub use error::{ConfigError, LayoutError, Result};
pub use render_state::{RenderState, TransitionTiming};
pub use style::LayoutStyle;
pub use tree::{LayoutNodeId, LayoutTree};
pub use widgets::{ScrollConfig, ScrollState, ScrollSurface, ScrollbarTrack};

/// Everything needed to build a document and scroll it
pub mod prelude {
    pub use crate::document::Document;
    pub use crate::style::LayoutStyle;
    pub use crate::tree::LayoutNodeId;
    pub use crate::widgets::{ScrollConfig, ScrollState, ScrollSurface, ScrollbarTrack};
}
