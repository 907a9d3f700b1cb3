use std::cell::Cell;
use std::sync::Arc;

use anyhow::Result;
use glam::{Quat, Vec3};

use scenery::backend::{Frame, GpuBackend, TextureDescriptor, TextureHandle};
use scenery::{
    FrameDispatcher, Geometry, ImportContext, LightKind, LightProps, MaterialSlot, Projection,
    Reconciler, SceneContext, SceneGraph, Token, TokenId,
};

/// Stand-in backend that logs what a real GPU backend would receive.
struct LoggingBackend {
    next_texture: Cell<u64>,
}

impl GpuBackend for LoggingBackend {
    fn create_texture(&self, descriptor: &TextureDescriptor, _pixels: &[u8]) -> TextureHandle {
        let id = self.next_texture.get();
        self.next_texture.set(id + 1);
        log::info!(
            "create_texture {}x{} ({:?})",
            descriptor.width,
            descriptor.height,
            descriptor.format
        );
        TextureHandle(id)
    }

    fn submit_frame(&mut self, frame: &Frame) -> Result<()> {
        log::info!(
            "frame {}: {} draws, {} lights",
            frame.index,
            frame.draws.len(),
            frame.lights.len()
        );
        Ok(())
    }
}

const DEMO_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "materials": [
        {
            "pbrMetallicRoughness": {
                "baseColorFactor": [0.8, 0.2, 0.2, 1.0],
                "metallicFactor": 0.1,
                "roughnessFactor": 0.9
            }
        }
    ]
}"#;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let mut graph = SceneGraph::new();
    let mut ctx = SceneContext::new();
    let mut reconciler = Reconciler::new();
    let mut dispatcher = FrameDispatcher::new();
    let mut backend = LoggingBackend {
        next_texture: Cell::new(0),
    };

    let import = ImportContext::from_json(DEMO_GLTF, Vec::new())?;
    let material = MaterialSlot::pending();
    material.fulfill(
        pollster::block_on(import.material(0, &backend))
            .map_err(|error| error.to_string()),
    );

    let camera_id = TokenId::unique();
    let light_id = TokenId::unique();
    let avatar_id = TokenId::unique();
    let geometry = Arc::new(Geometry::plane());

    for tick in 0..120u32 {
        let angle = tick as f32 / 20.0;
        let roots = vec![
            Token::camera(camera_id, Projection::perspective())
                .with_label("main_camera")
                .with_position(Vec3::new(0.0, 0.0, 5.0)),
            Token::light(
                light_id,
                LightProps {
                    kind: LightKind::Spot,
                    color: Vec3::ONE,
                    intensity: 100.0,
                },
            )
            .with_position(Vec3::new(0.0, 1.5, 0.5)),
            Token::mesh(avatar_id, geometry.clone(), material.clone())
                .with_label("avatar")
                .with_quaternion(Quat::from_rotation_z(angle)),
        ];

        reconciler.reconcile(&mut graph, &mut ctx, &roots);

        let active_camera = reconciler.node_for(camera_id);
        dispatcher.dispatch(&graph, &mut ctx, active_camera, &mut backend)?;
    }

    Ok(())
}
