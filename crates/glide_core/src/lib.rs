//! Glide Core Runtime
//!
//! This crate provides the foundational primitives shared by the Glide crates:
//!
//! - **Events**: Touch, click, transition and lifecycle events with a dispatcher
//! - **State Machines**: Enum-driven state machines for gesture handling
//! - **Geometry**: Points, sizes and axes used by layout and widgets
//!
//! # Example
//!
//! ```rust
//! use glide_core::events::event_types::{TOUCH_END, TOUCH_START};
//! use glide_core::fsm::{StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Press {
//!     #[default]
//!     Up,
//!     Down,
//! }
//!
//! impl StateTransitions for Press {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Press::Up, TOUCH_START) => Some(Press::Down),
//!             (Press::Down, TOUCH_END) => Some(Press::Up),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Press::Up);
//! fsm.send(TOUCH_START);
//! assert_eq!(fsm.current_state(), Press::Down);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Event, EventData, EventDispatcher, EventType};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Axis, Point, Size};
