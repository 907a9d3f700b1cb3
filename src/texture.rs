use crate::backend::TextureHandle;

/// A GPU texture created through the backend, together with the dimensions it
/// was uploaded with. The handle is opaque; disposal is the backend's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
}
