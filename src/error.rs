use thiserror::Error;

/// Errors surfaced by the scene graph and the asset importer.
///
/// Asset-load failures are fatal to the specific load call only; the frame
/// dispatcher keeps running and the affected node degrades until the caller
/// retries.
#[derive(Debug, Error)]
pub enum Error {
    /// An index referenced by the glTF document does not resolve.
    #[error("{kind} {index} not found in document")]
    NotFound { kind: &'static str, index: usize },

    /// The document uses a feature outside the supported subset.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A buffer range computed from the document falls outside the backing
    /// buffer.
    #[error("buffer {buffer} too short: need {offset}..{end}, have {len} bytes")]
    BufferRange {
        buffer: usize,
        offset: usize,
        end: usize,
        len: usize,
    },

    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("failed to parse glTF document: {0}")]
    Document(#[from] serde_json::Error),

    /// Attaching a node that already has a parent. The caller must detach
    /// first; silent re-parenting is never performed.
    #[error("node already has a parent, detach it first")]
    NodeAlreadyAttached,
}

impl Error {
    pub fn not_found(kind: &'static str, index: usize) -> Self {
        Error::NotFound { kind, index }
    }
}
