//! Interactive widgets built on the headless document

pub mod scroll;
pub mod scrollbar;

pub use scroll::{momentum, Momentum, ScrollConfig, ScrollState, ScrollSurface};
pub use scrollbar::ScrollbarTrack;
