use glam::Mat4;
use slotmap::SlotMap;

use crate::error::Error;
use crate::scene_graph::node::{Node, NodeId};

/// A forest of transform nodes with parent/child index links.
///
/// Parent/child relationships are stored as arena indices rather than owning
/// references; detaching a subtree leaves it internally linked and reusable.
pub struct SceneGraph {
    pub nodes: SlotMap<NodeId, Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn get_node_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, node)| node.label == label)
            .map(|(id, _)| id)
    }

    /// Nodes without a parent, in arena order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent_id.is_none())
            .map(|(id, _)| id)
    }

    /// Appends `child` to `parent`'s ordered child list and sets the back
    /// reference. Fails if the child is already attached somewhere; the
    /// caller must detach first. Detach-then-attach is not atomic.
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), Error> {
        let Some(child) = self.nodes.get(child_id) else {
            return Ok(());
        };
        if child.parent_id.is_some() {
            return Err(Error::NodeAlreadyAttached);
        }
        if self.nodes.get(parent_id).is_none() {
            return Ok(());
        }

        self.nodes[child_id].parent_id = Some(parent_id);
        self.nodes[parent_id].child_ids.push(child_id);
        Ok(())
    }

    /// Removes `child` from `parent`'s child list by identity and clears the
    /// back reference. No-op when the child is not attached to this parent.
    /// Descendants of the child are left attached to it.
    pub fn remove_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let Some(child) = self.nodes.get(child_id) else {
            return;
        };
        if child.parent_id != Some(parent_id) {
            return;
        }

        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.child_ids.retain(|&id| id != child_id);
        }
        self.nodes[child_id].parent_id = None;
    }

    /// Detaches the node from its parent, turns its children into roots and
    /// drops it from the arena.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let parent_id = self.nodes.get(id)?.parent_id;
        if let Some(parent_id) = parent_id {
            self.remove_child(parent_id, id);
        }

        let child_ids = self.nodes[id].child_ids.clone();
        for child_id in child_ids {
            if let Some(child) = self.nodes.get_mut(child_id) {
                child.parent_id = None;
            }
        }

        self.nodes.remove(id)
    }

    /// Recomputes world matrices for the node and its subtree, composing each
    /// local TRS matrix with the parent's current world matrix. A node with
    /// `auto_update == false` freezes its whole subtree. Recursion is
    /// unconditional per pass; only the cached local matrix short-circuits.
    pub fn update_world_transforms(&self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };

        let parent_world = node
            .parent_id
            .and_then(|parent_id| self.nodes.get(parent_id))
            .map(|parent| parent.transform.world_matrix())
            .unwrap_or(Mat4::IDENTITY);

        self.update_recursive(id, parent_world);
    }

    fn update_recursive(&self, id: NodeId, parent_world: Mat4) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.auto_update {
            return;
        }

        let world = parent_world * node.transform.local_matrix();
        node.transform.set_world_matrix(world);

        for &child_id in &node.child_ids {
            self.update_recursive(child_id, world);
        }
    }

    /// Depth-first pre-order walk. The visitor returning `true` prunes
    /// descent into that node's subtree only.
    pub fn traverse(&self, id: NodeId, visitor: &mut impl FnMut(NodeId, &Node) -> bool) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if visitor(id, node) {
            return;
        }
        for &child_id in &node.child_ids {
            self.traverse(child_id, visitor);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
