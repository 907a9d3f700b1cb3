use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::geometry::Geometry;
use crate::light::LightKind;
use crate::material::MaterialDescriptor;
use crate::scene_graph::NodeId;

/// Opaque id minted by the backend for an uploaded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba8Unorm,
    Rgba8UnormSrgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// One visible, non-culled mesh node, in traversal order.
pub struct DrawItem {
    pub node: NodeId,
    pub geometry: Arc<Geometry>,
    pub material: Arc<MaterialDescriptor>,
    pub world: Mat4,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraMatrices {
    pub view: Mat4,
    pub projection: Mat4,
    pub projection_view: Mat4,
}

#[derive(Debug, Clone, Copy)]
pub struct LightState {
    pub kind: LightKind,
    pub color: Vec3,
    pub intensity: f32,
    pub world: Mat4,
}

/// Everything the dispatcher hands off for one display tick.
pub struct Frame {
    pub index: u64,
    pub camera: CameraMatrices,
    pub draws: Vec<DrawItem>,
    pub lights: Vec<LightState>,
}

/// Capability boundary to the GPU. Device, pipeline and submission internals
/// live behind this trait and are out of scope for the crate.
///
/// `create_texture` takes `&self` so concurrent asset loads can share the
/// backend; implementations use interior mutability for handle bookkeeping.
pub trait GpuBackend {
    /// Uploads decoded pixel data (`width * height * 4` bytes for the RGBA
    /// formats) and returns an opaque handle.
    fn create_texture(&self, descriptor: &TextureDescriptor, pixels: &[u8]) -> TextureHandle;

    /// Submits the ordered draw set for one frame.
    fn submit_frame(&mut self, frame: &Frame) -> anyhow::Result<()>;
}
