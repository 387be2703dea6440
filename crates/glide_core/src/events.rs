//! Event dispatch system
//!
//! Touch, click and lifecycle events exchanged between a host and its widgets.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const TOUCH_START: EventType = 1;
    pub const TOUCH_MOVE: EventType = 2;
    pub const TOUCH_END: EventType = 3;
    /// Touch sequence aborted by the platform (no release point)
    pub const TOUCH_CANCEL: EventType = 4;
    /// Mouse-style click, also synthesized for taps
    pub const CLICK: EventType = 5;

    /// Device rotated; layouts should be re-measured
    pub const ORIENTATION_CHANGE: EventType = 40;

    /// A node's subtree changed size or structure
    pub const SUBTREE_MODIFIED: EventType = 60;
    /// A visual transition finished playing
    pub const TRANSITION_END: EventType = 61;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64, // Node ID
    pub data: EventData,
    /// Milliseconds on the host clock
    pub timestamp: u64,
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

/// Touch points carried by a touch event. One or two is the common case.
pub type TouchList = SmallVec<[TouchPoint; 2]>;

/// A single finger on the surface
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub identifier: u32,
    /// Position relative to the document
    pub page: Point,
    /// Position relative to the visible area
    pub client: Point,
    /// Position relative to the physical screen
    pub screen: Point,
    /// Node the touch started on
    pub target: u64,
}

impl TouchPoint {
    /// Touch at the same page, client and screen position
    pub fn at(identifier: u32, x: f32, y: f32, target: u64) -> Self {
        let p = Point::new(x, y);
        Self {
            identifier,
            page: p,
            client: p,
            screen: p,
            target,
        }
    }
}

/// Payload of touch events
#[derive(Clone, Debug, Default)]
pub struct TouchData {
    /// Every finger currently on the surface
    pub touches: TouchList,
    /// Fingers that started on the event's target
    pub target_touches: TouchList,
    /// Fingers that changed in this event
    pub changed_touches: TouchList,
    pub modifiers: Modifiers,
    pub detail: i32,
}

impl TouchData {
    /// A single finger that is still down (start/move)
    pub fn single(point: TouchPoint) -> Self {
        let list: TouchList = smallvec::smallvec![point];
        Self {
            touches: list.clone(),
            target_touches: list.clone(),
            changed_touches: list,
            modifiers: Modifiers::NONE,
            detail: 0,
        }
    }

    /// A single finger that was just lifted (end/cancel)
    pub fn released(point: TouchPoint) -> Self {
        Self {
            touches: TouchList::new(),
            target_touches: TouchList::new(),
            changed_touches: smallvec::smallvec![point],
            modifiers: Modifiers::NONE,
            detail: 0,
        }
    }
}

/// Visual property a transition animated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionProperty {
    Transform,
    Opacity,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Touch(TouchData),
    Click {
        screen: Point,
        client: Point,
        button: u8,
        /// Click count, copied from the originating touch event
        detail: i32,
        modifiers: Modifiers,
    },
    Transition {
        property: TransitionProperty,
        elapsed_ms: f32,
    },
    Resize {
        width: u32,
        height: u32,
    },
    None,
}

/// Modifier keys held while a touch was made; copied onto synthesized clicks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

impl Event {
    pub fn new(event_type: EventType, target: u64, data: EventData, timestamp: u64) -> Self {
        Self {
            event_type,
            target,
            data,
            timestamp,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Tell the host not to run its built-in behavior (native scrolling, clicks)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Touch payload, if this is a touch event
    pub fn touch(&self) -> Option<&TouchData> {
        match &self.data {
            EventData::Touch(data) => Some(data),
            _ => None,
        }
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    handlers: FxHashMap<(u64, EventType), Vec<EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Register an event handler for a node and event type
    pub fn register<F>(&mut self, node_id: u64, event_type: EventType, handler: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.handlers
            .entry((node_id, event_type))
            .or_default()
            .push(Box::new(handler));
    }

    /// Drop every handler registered for a node
    pub fn unregister_node(&mut self, node_id: u64) {
        self.handlers.retain(|(id, _), _| *id != node_id);
    }

    /// Dispatch an event to all registered handlers
    ///
    /// Returns the number of handlers that ran.
    pub fn dispatch(&self, event: &mut Event) -> usize {
        let mut ran = 0;
        if let Some(handlers) = self.handlers.get(&(event.target, event.event_type)) {
            for handler in handlers {
                if event.propagation_stopped {
                    break;
                }
                handler(event);
                ran += 1;
            }
        }
        ran
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
