use crate::backend::{CameraMatrices, DrawItem, Frame, GpuBackend, LightState};
use crate::camera::CameraContext;
use crate::material::MaterialState;
use crate::math::Frustum;
use crate::scene_context::SceneContext;
use crate::scene_graph::{NodeId, SceneGraph};

/// Per-tick driver: propagates world transforms, refreshes the active
/// camera's view matrices, gathers the visible draw set and light state in
/// traversal order, and hands the frame to the GPU backend.
pub struct FrameDispatcher {
    default_camera: CameraContext,
    frame_index: u64,
}

impl FrameDispatcher {
    pub fn new() -> Self {
        Self {
            default_camera: CameraContext::identity(),
            frame_index: 0,
        }
    }

    /// Runs one display tick.
    ///
    /// Invisible nodes are excluded from the draw set but still get their
    /// transforms updated; only `auto_update == false` freezes transforms.
    /// Meshes whose material is still pending or has failed are skipped for
    /// this frame. When `active_camera` is absent or unregistered, a default
    /// camera with identity transform and identity projection is used.
    pub fn dispatch(
        &mut self,
        graph: &SceneGraph,
        ctx: &mut SceneContext,
        active_camera: Option<NodeId>,
        backend: &mut dyn GpuBackend,
    ) -> anyhow::Result<()> {
        let roots: Vec<NodeId> = graph.roots().collect();
        for &root in &roots {
            graph.update_world_transforms(root);
        }

        let camera = self.update_camera(graph, ctx, active_camera);
        let frustum = Frustum::from_view_projection(camera.projection_view);

        let mut draws = Vec::new();
        let mut lights = Vec::new();

        for &root in &roots {
            graph.traverse(root, &mut |node_id, node| {
                let world = node.transform.world_matrix();

                if let Some(light) = ctx.lights.get(&node_id) {
                    lights.push(LightState {
                        kind: light.kind,
                        color: light.color,
                        intensity: light.intensity,
                        world,
                    });
                }

                if !node.visible {
                    return false;
                }

                if let Some(mesh) = ctx.meshes.get(&node_id) {
                    match mesh.material.state() {
                        MaterialState::Ready(material) => {
                            let culled = node.frustum_culled
                                && !mesh
                                    .geometry
                                    .bounds
                                    .transform(&world)
                                    .intersects_frustum(&frustum);

                            if !culled {
                                draws.push(DrawItem {
                                    node: node_id,
                                    geometry: mesh.geometry.clone(),
                                    material: material.clone(),
                                    world,
                                });
                            }
                        }
                        MaterialState::Pending => {
                            log::trace!("skipping {:?}: material still loading", node_id);
                        }
                        MaterialState::Failed(reason) => {
                            log::debug!("skipping {:?}: material failed: {reason}", node_id);
                        }
                    }
                }

                false
            });
        }

        let frame = Frame {
            index: self.frame_index,
            camera,
            draws,
            lights,
        };

        backend.submit_frame(&frame)?;
        self.frame_index += 1;

        Ok(())
    }

    fn update_camera(
        &mut self,
        graph: &SceneGraph,
        ctx: &mut SceneContext,
        active_camera: Option<NodeId>,
    ) -> CameraMatrices {
        let camera = active_camera.and_then(|id| {
            let world = graph.get_node(id)?.transform.world_matrix();
            let camera = ctx.cameras.get_mut(&id)?;
            camera.update_from_world(world);
            Some(camera)
        });

        let camera = match camera {
            Some(camera) => &*camera,
            None => {
                if active_camera.is_some() {
                    log::warn!("active camera is not registered, using default camera");
                }
                &self.default_camera
            }
        };

        CameraMatrices {
            view: camera.view_matrix,
            projection: camera.projection_matrix,
            projection_view: camera.projection_view_matrix,
        }
    }
}

impl Default for FrameDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::{Mat4, Vec3};

    use super::*;
    use crate::backend::{TextureDescriptor, TextureHandle};
    use crate::camera::{CameraContext, Projection};
    use crate::geometry::Geometry;
    use crate::material::{MaterialDescriptor, MaterialSlot};
    use crate::scene_context::MeshContext;
    use crate::scene_graph::Node;

    #[derive(Default)]
    struct RecordingBackend {
        draw_counts: Vec<usize>,
        light_counts: Vec<usize>,
        last_camera: Option<CameraMatrices>,
    }

    impl GpuBackend for RecordingBackend {
        fn create_texture(&self, _descriptor: &TextureDescriptor, _pixels: &[u8]) -> TextureHandle {
            TextureHandle(0)
        }

        fn submit_frame(&mut self, frame: &Frame) -> anyhow::Result<()> {
            self.draw_counts.push(frame.draws.len());
            self.light_counts.push(frame.lights.len());
            self.last_camera = Some(frame.camera);
            Ok(())
        }
    }

    fn mesh_node(
        graph: &mut SceneGraph,
        ctx: &mut SceneContext,
        material: MaterialSlot,
    ) -> NodeId {
        let id = graph.add_node(Node::with_label("mesh"));
        ctx.meshes.insert(
            id,
            MeshContext {
                geometry: Arc::new(Geometry::plane()),
                material,
            },
        );
        id
    }

    #[test]
    fn default_camera_is_identity_when_none_registered() {
        let graph = SceneGraph::new();
        let mut ctx = SceneContext::new();
        let mut backend = RecordingBackend::default();
        let mut dispatcher = FrameDispatcher::new();

        dispatcher
            .dispatch(&graph, &mut ctx, None, &mut backend)
            .unwrap();

        let camera = backend.last_camera.unwrap();
        assert_eq!(camera.view, Mat4::IDENTITY);
        assert_eq!(camera.projection, Mat4::IDENTITY);
        assert_eq!(camera.projection_view, Mat4::IDENTITY);
    }

    #[test]
    fn invisible_nodes_are_skipped_but_transforms_update() {
        let mut graph = SceneGraph::new();
        let mut ctx = SceneContext::new();
        let id = mesh_node(
            &mut graph,
            &mut ctx,
            MaterialSlot::ready(MaterialDescriptor::default()),
        );
        let node = graph.get_node_mut(id).unwrap();
        node.visible = false;
        node.frustum_culled = false;
        node.transform.set_translation(Vec3::new(2.0, 0.0, 0.0));

        let mut backend = RecordingBackend::default();
        let mut dispatcher = FrameDispatcher::new();
        dispatcher
            .dispatch(&graph, &mut ctx, None, &mut backend)
            .unwrap();

        assert_eq!(backend.draw_counts, vec![0]);
        assert_eq!(
            graph.get_node(id).unwrap().transform.world_matrix(),
            Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0))
        );
    }

    #[test]
    fn pending_material_degrades_to_skip_until_fulfilled() {
        let mut graph = SceneGraph::new();
        let mut ctx = SceneContext::new();
        let slot = MaterialSlot::pending();
        let id = mesh_node(&mut graph, &mut ctx, slot.clone());
        graph.get_node_mut(id).unwrap().frustum_culled = false;

        let mut backend = RecordingBackend::default();
        let mut dispatcher = FrameDispatcher::new();

        dispatcher
            .dispatch(&graph, &mut ctx, None, &mut backend)
            .unwrap();
        slot.fulfill(Ok(Arc::new(MaterialDescriptor::default())));
        dispatcher
            .dispatch(&graph, &mut ctx, None, &mut backend)
            .unwrap();

        assert_eq!(backend.draw_counts, vec![0, 1]);
    }

    #[test]
    fn failed_material_never_crashes_the_loop() {
        let mut graph = SceneGraph::new();
        let mut ctx = SceneContext::new();
        let slot = MaterialSlot::pending();
        slot.fulfill(Err("decode failed".into()));
        let id = mesh_node(&mut graph, &mut ctx, slot);
        graph.get_node_mut(id).unwrap().frustum_culled = false;

        let mut backend = RecordingBackend::default();
        let mut dispatcher = FrameDispatcher::new();

        for _ in 0..3 {
            dispatcher
                .dispatch(&graph, &mut ctx, None, &mut backend)
                .unwrap();
        }

        assert_eq!(backend.draw_counts, vec![0, 0, 0]);
    }

    #[test]
    fn frustum_culling_drops_meshes_behind_the_camera() {
        let mut graph = SceneGraph::new();
        let mut ctx = SceneContext::new();

        let camera_id = graph.add_node(Node::with_label("camera"));
        ctx.cameras
            .insert(camera_id, CameraContext::new(Projection::perspective()));

        let visible_id = mesh_node(
            &mut graph,
            &mut ctx,
            MaterialSlot::ready(MaterialDescriptor::default()),
        );
        graph
            .get_node_mut(visible_id)
            .unwrap()
            .transform
            .set_translation(Vec3::new(0.0, 0.0, -5.0));

        let behind_id = mesh_node(
            &mut graph,
            &mut ctx,
            MaterialSlot::ready(MaterialDescriptor::default()),
        );
        graph
            .get_node_mut(behind_id)
            .unwrap()
            .transform
            .set_translation(Vec3::new(0.0, 0.0, 50.0));

        let mut backend = RecordingBackend::default();
        let mut dispatcher = FrameDispatcher::new();
        dispatcher
            .dispatch(&graph, &mut ctx, Some(camera_id), &mut backend)
            .unwrap();
        assert_eq!(backend.draw_counts, vec![1]);

        // Opting out of culling draws it regardless.
        graph.get_node_mut(behind_id).unwrap().frustum_culled = false;
        dispatcher
            .dispatch(&graph, &mut ctx, Some(camera_id), &mut backend)
            .unwrap();
        assert_eq!(backend.draw_counts, vec![1, 2]);
    }

    #[test]
    fn lights_are_collected_with_world_transforms() {
        let mut graph = SceneGraph::new();
        let mut ctx = SceneContext::new();
        let light_id = graph.add_node(Node::with_label("light"));
        graph
            .get_node_mut(light_id)
            .unwrap()
            .transform
            .set_translation(Vec3::new(0.0, 1.5, 0.5));
        ctx.lights
            .insert(light_id, crate::light::LightContext::default());

        let mut backend = RecordingBackend::default();
        let mut dispatcher = FrameDispatcher::new();
        dispatcher
            .dispatch(&graph, &mut ctx, None, &mut backend)
            .unwrap();

        assert_eq!(backend.light_counts, vec![1]);
    }
}
