//! Headless document
//!
//! A [`Document`] stands in for the host page: it owns the layout tree, the
//! render state, an event dispatcher for application handlers and a queue of
//! pending events. Widgets receive `&mut Document` in every call instead of
//! holding references into it.
//!
//! Structural and size changes queue a `SUBTREE_MODIFIED` event at the
//! affected node, rotating the window queues `ORIENTATION_CHANGE`, and
//! [`Document::tick`] queues `TRANSITION_END` for every transition that
//! finished.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use taffy::prelude::{AvailableSpace, Style};

use glide_core::events::{event_types, Event, EventData, EventType, TouchData, TouchPoint};
use glide_core::{Axis, EventDispatcher, Size};

use crate::element::ElementBounds;
use crate::error::{LayoutError, Result};
use crate::render_state::RenderState;
use crate::style::LayoutStyle;
use crate::tree::{LayoutNodeId, LayoutTree};

/// What a node represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NodeKind {
    #[default]
    Element,
    /// Text run; events targeting it are delivered to its parent element
    Text,
}

pub struct Document {
    tree: LayoutTree,
    render: RenderState,
    dispatcher: EventDispatcher,
    kinds: FxHashMap<LayoutNodeId, NodeKind>,
    root: LayoutNodeId,
    window: Size,
    queue: VecDeque<Event>,
    /// Number of events dispatched per type
    dispatched: FxHashMap<EventType, usize>,
    now_ms: u64,
    layout_dirty: bool,
}

impl Document {
    /// Create a document whose root fills a window of the given size
    pub fn new(window: Size) -> Result<Self> {
        let mut tree = LayoutTree::new();
        let root = tree.create_node(LayoutStyle::window(window.width, window.height))?;
        Ok(Self {
            tree,
            render: RenderState::new(),
            dispatcher: EventDispatcher::new(),
            kinds: FxHashMap::default(),
            root,
            window,
            queue: VecDeque::new(),
            dispatched: FxHashMap::default(),
            now_ms: 0,
            layout_dirty: true,
        })
    }

    pub fn root(&self) -> LayoutNodeId {
        self.root
    }

    pub fn window(&self) -> Size {
        self.window
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    pub fn render(&self) -> &RenderState {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut RenderState {
        &mut self.render
    }

    /// Register application handlers (click listeners and the like)
    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn create_element(&mut self, parent: LayoutNodeId, style: Style) -> Result<LayoutNodeId> {
        self.create_node(parent, style, NodeKind::Element)
    }

    pub fn create_text(&mut self, parent: LayoutNodeId, style: Style) -> Result<LayoutNodeId> {
        self.create_node(parent, style, NodeKind::Text)
    }

    fn create_node(
        &mut self,
        parent: LayoutNodeId,
        style: Style,
        kind: NodeKind,
    ) -> Result<LayoutNodeId> {
        if !self.tree.contains(parent) {
            return Err(LayoutError::UnknownNode(parent));
        }
        let node = self.tree.create_node(style)?;
        self.tree.add_child(parent, node)?;
        self.kinds.insert(node, kind);
        self.mark_modified(parent);
        Ok(node)
    }

    /// Remove a node; its children are detached with it
    pub fn remove_node(&mut self, node: LayoutNodeId) -> Result<()> {
        let parent = self.tree.parent(node);
        self.tree.remove_node(node)?;
        self.kinds.remove(&node);
        self.render.remove(node);
        self.dispatcher.unregister_node(node.to_raw());
        if let Some(parent) = parent {
            self.mark_modified(parent);
        }
        Ok(())
    }

    pub fn set_size(&mut self, node: LayoutNodeId, size: Size) -> Result<()> {
        let style = self.tree.style(node)?;
        let style = LayoutStyle::with_length(style, Axis::Horizontal, size.width);
        let style = LayoutStyle::with_length(&style, Axis::Vertical, size.height);
        self.tree.set_style(node, style)?;
        self.mark_modified(node);
        Ok(())
    }

    /// Resize a node along one axis only
    pub fn set_length(&mut self, node: LayoutNodeId, axis: Axis, length: f32) -> Result<()> {
        let style = LayoutStyle::with_length(self.tree.style(node)?, axis, length);
        self.tree.set_style(node, style)?;
        self.mark_modified(node);
        Ok(())
    }

    pub fn parent(&self, node: LayoutNodeId) -> Option<LayoutNodeId> {
        self.tree.parent(node)
    }

    pub fn kind(&self, node: LayoutNodeId) -> Option<NodeKind> {
        self.kinds.get(&node).copied()
    }

    pub fn contains(&self, node: LayoutNodeId) -> bool {
        self.tree.contains(node)
    }

    /// True if `node` is `ancestor` or one of its descendants
    pub fn is_within(&self, node: LayoutNodeId, ancestor: LayoutNodeId) -> bool {
        self.tree.is_within(node, ancestor)
    }

    /// Nearest element for an event target: text nodes resolve to their parent
    pub fn element_for(&self, node: LayoutNodeId) -> Option<LayoutNodeId> {
        match self.kind(node) {
            Some(NodeKind::Text) => self.parent(node),
            Some(NodeKind::Element) => Some(node),
            None if node == self.root => Some(node),
            None => None,
        }
    }

    fn mark_modified(&mut self, node: LayoutNodeId) {
        self.layout_dirty = true;
        self.queue.push_back(Event::new(
            event_types::SUBTREE_MODIFIED,
            node.to_raw(),
            EventData::None,
            self.now_ms,
        ));
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Measure a node, recomputing layout first if anything changed
    pub fn measure(&mut self, node: LayoutNodeId) -> Result<ElementBounds> {
        if self.layout_dirty {
            self.tree.compute_layout(
                self.root,
                taffy::geometry::Size {
                    width: AvailableSpace::Definite(self.window.width),
                    height: AvailableSpace::Definite(self.window.height),
                },
            )?;
            self.layout_dirty = false;
        }
        self.tree
            .get_layout(node)
            .map(ElementBounds::from_layout)
            .ok_or(LayoutError::UnknownNode(node))
    }

    /// Rotate or resize the window
    pub fn set_window(&mut self, window: Size) -> Result<()> {
        self.window = window;
        let style = LayoutStyle::window(window.width, window.height);
        self.tree.set_style(self.root, style)?;
        self.layout_dirty = true;
        self.queue.push_back(Event::new(
            event_types::ORIENTATION_CHANGE,
            self.root.to_raw(),
            EventData::Resize {
                width: window.width as u32,
                height: window.height as u32,
            },
            self.now_ms,
        ));
        Ok(())
    }

    // =========================================================================
    // Events and time
    // =========================================================================

    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    pub fn poll_event(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Queue a single-finger touch event at the current time
    ///
    /// `TOUCH_START`/`TOUCH_MOVE` keep the finger down; `TOUCH_END` and
    /// `TOUCH_CANCEL` report it as lifted.
    pub fn push_touch(&mut self, event_type: EventType, point: TouchPoint) {
        let data = match event_type {
            event_types::TOUCH_END | event_types::TOUCH_CANCEL => TouchData::released(point),
            _ => TouchData::single(point),
        };
        self.queue.push_back(Event::new(
            event_type,
            point.target,
            EventData::Touch(data),
            self.now_ms,
        ));
    }

    /// Dispatch an event to application handlers right away
    pub fn dispatch(&mut self, event: &mut Event) -> usize {
        *self.dispatched.entry(event.event_type).or_default() += 1;
        self.dispatcher.dispatch(event)
    }

    /// How many events of a type went through [`Document::dispatch`]
    pub fn dispatched(&self, event_type: EventType) -> usize {
        self.dispatched.get(&event_type).copied().unwrap_or(0)
    }

    /// Advance the clock and play transitions forward
    pub fn tick(&mut self, dt_ms: u64) {
        self.now_ms += dt_ms;
        for done in self.render.tick(dt_ms as f32) {
            tracing::trace!(node = ?done.node, property = ?done.property, "transition end");
            self.queue.push_back(Event::new(
                event_types::TRANSITION_END,
                done.node.to_raw(),
                EventData::Transition {
                    property: done.property,
                    elapsed_ms: done.elapsed_ms,
                },
                self.now_ms,
            ));
        }
    }

    /// Advance the clock without playing transitions
    pub fn advance_clock(&mut self, dt_ms: u64) {
        self.now_ms += dt_ms;
    }
}
