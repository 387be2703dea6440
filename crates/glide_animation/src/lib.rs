//! Glide Animation System
//!
//! Easing curves and timed transitions, played back the way a browser
//! compositor plays CSS transitions.
//!
//! # Features
//!
//! - **Easing**: CSS `linear` and `cubic-bezier()` timing functions
//! - **Transitions**: A single value moving from one point to another over a duration
//! - **Scheduler**: Owns running transitions and reports which ones finished each tick

pub mod easing;
pub mod scheduler;
pub mod transition;

pub use easing::Easing;
pub use scheduler::{TransitionId, TransitionScheduler};
pub use transition::Transition;
