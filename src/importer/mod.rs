pub mod accessor;
pub mod document;
pub mod material;

pub use accessor::{get_accessor, AccessorView, ComponentKind, ElementShape};
pub use document::Document;

use std::cell::RefCell;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::backend::{GpuBackend, TextureDescriptor, TextureFormat};
use crate::cache::ResourceCache;
use crate::error::Error;
use crate::material::MaterialDescriptor;
use crate::texture::Texture;

/// One glTF import: the parsed document subset, the raw buffers it
/// references, and a private cache scope so repeated imports never
/// cross-contaminate.
///
/// Texture and material production is memoized per index. The cached entry is
/// the in-flight slot itself, so concurrent requests for the same index await
/// the first caller's production instead of duplicating decode work. A failed
/// production leaves the slot empty; retrying is the caller's decision.
pub struct ImportContext {
    pub document: Document,
    pub buffers: Vec<Vec<u8>>,
    textures: RefCell<ResourceCache<String, Arc<OnceCell<Texture>>>>,
    materials: RefCell<ResourceCache<String, Arc<OnceCell<Arc<MaterialDescriptor>>>>>,
}

impl ImportContext {
    pub fn new(document: Document, buffers: Vec<Vec<u8>>) -> Self {
        Self {
            document,
            buffers,
            textures: RefCell::new(ResourceCache::new()),
            materials: RefCell::new(ResourceCache::new()),
        }
    }

    pub fn from_json(json: &str, buffers: Vec<Vec<u8>>) -> Result<Self, Error> {
        Ok(Self::new(Document::from_json(json)?, buffers))
    }

    /// Decoded and uploaded texture for a glTF texture index, memoized within
    /// this import.
    pub async fn texture(&self, index: usize, backend: &dyn GpuBackend) -> Result<Texture, Error> {
        let slot = self
            .textures
            .borrow_mut()
            .get_or_create(format!("texture_{index}"), || Arc::new(OnceCell::new()))
            .clone();

        slot.get_or_try_init(|| self.load_texture(index, backend))
            .await
            .copied()
    }

    async fn load_texture(&self, index: usize, backend: &dyn GpuBackend) -> Result<Texture, Error> {
        let texture = self
            .document
            .textures
            .get(index)
            .ok_or_else(|| Error::not_found("texture", index))?;
        let source = texture
            .source
            .ok_or_else(|| Error::Unsupported(format!("texture {index} has no source image")))?;
        let image = self
            .document
            .images
            .get(source)
            .ok_or_else(|| Error::not_found("image", source))?;

        let bytes = self.image_bytes(image)?;
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();

        let descriptor = TextureDescriptor {
            width,
            height,
            format: TextureFormat::Rgba8Unorm,
        };
        let handle = backend.create_texture(&descriptor, decoded.as_raw());
        log::debug!("uploaded texture {index} ({width}x{height})");

        Ok(Texture {
            handle,
            width,
            height,
        })
    }

    fn image_bytes(&self, image: &document::Image) -> Result<&[u8], Error> {
        let Some(view_index) = image.buffer_view else {
            // Fetching by URI belongs to the external I/O collaborator.
            return Err(Error::Unsupported(format!(
                "image without buffer view (uri: {:?})",
                image.uri
            )));
        };

        let view = self
            .document
            .buffer_views
            .get(view_index)
            .ok_or_else(|| Error::not_found("buffer view", view_index))?;
        let buffer = self
            .buffers
            .get(view.buffer)
            .ok_or_else(|| Error::not_found("buffer", view.buffer))?;

        let end = match view.byte_length {
            Some(length) => view.byte_offset + length,
            None => buffer.len(),
        };

        buffer
            .get(view.byte_offset..end)
            .ok_or(Error::BufferRange {
                buffer: view.buffer,
                offset: view.byte_offset,
                end,
                len: buffer.len(),
            })
    }
}
