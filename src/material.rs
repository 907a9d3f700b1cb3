use std::sync::{Arc, OnceLock};

use glam::Vec3;

use crate::texture::Texture;

/// Classified material, built once per glTF material index and cached.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialDescriptor {
    Unlit {
        albedo: Vec3,
        albedo_texture: Option<Texture>,
    },
    Pbr {
        albedo: Vec3,
        metallic: f32,
        roughness: f32,
        albedo_texture: Option<Texture>,
        occlusion_roughness_metallic_texture: Option<Texture>,
    },
}

impl Default for MaterialDescriptor {
    /// glTF defaults: white base color, fully metallic, fully rough.
    fn default() -> Self {
        MaterialDescriptor::Pbr {
            albedo: Vec3::ONE,
            metallic: 1.0,
            roughness: 1.0,
            albedo_texture: None,
            occlusion_roughness_metallic_texture: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialState<'a> {
    /// Asset load still in flight. The node is skipped at draw time.
    Pending,
    Ready(&'a Arc<MaterialDescriptor>),
    Failed(&'a str),
}

/// Write-once slot for an asynchronously produced material.
///
/// The importer (or any loader task) fulfills the slot when the load
/// resolves; the frame dispatcher polls it without blocking. Cloning shares
/// the slot.
#[derive(Debug, Clone, Default)]
pub struct MaterialSlot {
    inner: Arc<OnceLock<Result<Arc<MaterialDescriptor>, String>>>,
}

impl MaterialSlot {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn ready(descriptor: MaterialDescriptor) -> Self {
        let slot = Self::default();
        let _ = slot.inner.set(Ok(Arc::new(descriptor)));
        slot
    }

    /// Resolves the slot. Later fulfillments are ignored; a caller wanting
    /// cancellation discards the slot instead.
    pub fn fulfill(&self, result: Result<Arc<MaterialDescriptor>, String>) {
        let _ = self.inner.set(result);
    }

    pub fn state(&self) -> MaterialState<'_> {
        match self.inner.get() {
            None => MaterialState::Pending,
            Some(Ok(descriptor)) => MaterialState::Ready(descriptor),
            Some(Err(reason)) => MaterialState::Failed(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_transitions_from_pending_to_ready() {
        let slot = MaterialSlot::pending();
        assert_eq!(slot.state(), MaterialState::Pending);

        let shared = slot.clone();
        shared.fulfill(Ok(Arc::new(MaterialDescriptor::default())));

        assert!(matches!(slot.state(), MaterialState::Ready(_)));
    }

    #[test]
    fn slot_keeps_first_fulfillment() {
        let slot = MaterialSlot::pending();
        slot.fulfill(Err("decode failed".into()));
        slot.fulfill(Ok(Arc::new(MaterialDescriptor::default())));

        assert_eq!(slot.state(), MaterialState::Failed("decode failed"));
    }
}
