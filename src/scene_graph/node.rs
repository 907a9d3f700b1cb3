use glam::Vec3;
use slotmap::new_key_type;

use crate::scene_graph::transform::Transform;

new_key_type! {
    /// Stable generational index of a node in the scene graph.
    pub struct NodeId;
}

pub struct Node {
    pub label: String,
    pub transform: Transform,
    /// Orientation hint for look-at style operations. Default is +Y.
    pub up: Vec3,
    /// When false, world transform propagation skips this node and its whole
    /// subtree, freezing their world matrices.
    pub auto_update: bool,
    /// When false the node is excluded from the draw set. Transforms still
    /// update.
    pub visible: bool,
    /// Whether the node may be culled against the active camera frustum.
    pub frustum_culled: bool,
    pub parent_id: Option<NodeId>,
    pub child_ids: Vec<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            label: String::new(),
            transform: Transform::default(),
            up: Vec3::Y,
            auto_update: true,
            visible: true,
            frustum_culled: true,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }
}

impl Node {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}
