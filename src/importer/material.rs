use std::sync::Arc;

use glam::Vec3;
use tokio::sync::OnceCell;

use crate::backend::GpuBackend;
use crate::error::Error;
use crate::importer::ImportContext;
use crate::material::MaterialDescriptor;
use crate::texture::Texture;

impl ImportContext {
    /// Classified material for a glTF material index, built once per index
    /// within this import.
    ///
    /// Only the metallic-roughness model and the `KHR_materials_unlit`
    /// extension are supported; anything else is `Unsupported` rather than
    /// silently approximated.
    pub async fn material(
        &self,
        index: usize,
        backend: &dyn GpuBackend,
    ) -> Result<Arc<MaterialDescriptor>, Error> {
        let slot = self
            .materials
            .borrow_mut()
            .get_or_create(format!("material_{index}"), || Arc::new(OnceCell::new()))
            .clone();

        slot.get_or_try_init(|| self.build_material(index, backend))
            .await
            .cloned()
    }

    async fn build_material(
        &self,
        index: usize,
        backend: &dyn GpuBackend,
    ) -> Result<Arc<MaterialDescriptor>, Error> {
        let material = self
            .document
            .materials
            .get(index)
            .ok_or_else(|| Error::not_found("material", index))?;

        let mr = material.pbr_metallic_roughness.as_ref().ok_or_else(|| {
            Error::Unsupported(
                "only pbrMetallicRoughness and KHR_materials_unlit materials are supported".into(),
            )
        })?;

        let albedo = mr
            .base_color_factor
            .map(|factor| Vec3::new(factor[0], factor[1], factor[2]))
            .unwrap_or(Vec3::ONE);

        let albedo_texture = match mr.base_color_texture {
            Some(texture_ref) => Some(self.texture(texture_ref.index, backend).await?),
            None => None,
        };

        if material.is_unlit() {
            return Ok(Arc::new(MaterialDescriptor::Unlit {
                albedo,
                albedo_texture,
            }));
        }

        let occlusion_roughness_metallic_texture: Option<Texture> =
            match mr.metallic_roughness_texture {
                Some(texture_ref) => Some(self.texture(texture_ref.index, backend).await?),
                None => None,
            };

        Ok(Arc::new(MaterialDescriptor::Pbr {
            albedo,
            metallic: mr.metallic_factor.unwrap_or(1.0),
            roughness: mr.roughness_factor.unwrap_or(1.0),
            albedo_texture,
            occlusion_roughness_metallic_texture,
        }))
    }
}
