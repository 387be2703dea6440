//! Layout tree management

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use taffy::prelude::*;

use crate::error::{LayoutError, Result};

new_key_type! {
    pub struct LayoutNodeId;
}

impl LayoutNodeId {
    /// Stable integer form, used as the event target id
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

/// Maps between Glide node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
    reverse: FxHashMap<NodeId, LayoutNodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
            reverse: FxHashMap::default(),
        }
    }

    fn taffy_node(&self, id: LayoutNodeId) -> Result<NodeId> {
        self.node_map
            .get(id)
            .copied()
            .ok_or(LayoutError::UnknownNode(id))
    }

    pub fn contains(&self, id: LayoutNodeId) -> bool {
        self.node_map.contains_key(id)
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf(style)?;
        let id = self.node_map.insert(taffy_node);
        self.reverse.insert(taffy_node, id);
        Ok(id)
    }

    pub fn style(&self, id: LayoutNodeId) -> Result<&Style> {
        Ok(self.taffy.style(self.taffy_node(id)?)?)
    }

    /// Set the style for a node
    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) -> Result<()> {
        let node = self.taffy_node(id)?;
        self.taffy.set_style(node, style)?;
        Ok(())
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<()> {
        let parent_node = self.taffy_node(parent)?;
        let child_node = self.taffy_node(child)?;
        self.taffy.add_child(parent_node, child_node)?;
        Ok(())
    }

    pub fn parent(&self, id: LayoutNodeId) -> Option<LayoutNodeId> {
        let node = self.node_map.get(id)?;
        let parent = self.taffy.parent(*node)?;
        self.reverse.get(&parent).copied()
    }

    pub fn children(&self, id: LayoutNodeId) -> Result<Vec<LayoutNodeId>> {
        let node = self.taffy_node(id)?;
        Ok(self
            .taffy
            .children(node)?
            .into_iter()
            .filter_map(|child| self.reverse.get(&child).copied())
            .collect())
    }

    /// True if `id` is `ancestor` or sits somewhere below it
    pub fn is_within(&self, id: LayoutNodeId, ancestor: LayoutNodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(
        &mut self,
        root: LayoutNodeId,
        available_space: Size<AvailableSpace>,
    ) -> Result<()> {
        let node = self.taffy_node(root)?;
        self.taffy.compute_layout(node, available_space)?;
        Ok(())
    }

    /// Get the computed layout for a node
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Remove a node. Its children are detached, not removed.
    pub fn remove_node(&mut self, id: LayoutNodeId) -> Result<()> {
        let taffy_node = self
            .node_map
            .remove(id)
            .ok_or(LayoutError::UnknownNode(id))?;
        self.reverse.remove(&taffy_node);
        self.taffy.remove(taffy_node)?;
        Ok(())
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}
