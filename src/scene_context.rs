use std::collections::HashMap;
use std::sync::Arc;

use crate::camera::CameraContext;
use crate::geometry::Geometry;
use crate::light::LightContext;
use crate::material::MaterialSlot;
use crate::scene_graph::NodeId;

/// Per-mesh-node binding of geometry to a (possibly still loading) material.
#[derive(Clone)]
pub struct MeshContext {
    pub geometry: Arc<Geometry>,
    pub material: MaterialSlot,
}

/// Side tables of category-specific derived state, keyed by node identity.
/// Entries are created by the reconciler when a node of that category is
/// instantiated, updated in place, and removed when the node is destroyed.
#[derive(Default)]
pub struct SceneContext {
    pub cameras: HashMap<NodeId, CameraContext>,
    pub lights: HashMap<NodeId, LightContext>,
    pub meshes: HashMap<NodeId, MeshContext>,
}

impl SceneContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every context entry for the node.
    pub fn remove_node(&mut self, id: NodeId) {
        self.cameras.remove(&id);
        self.lights.remove(&id);
        self.meshes.remove(&id);
    }
}
