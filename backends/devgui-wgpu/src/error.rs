//! Error types for the wgpu renderer backend.

use thiserror::Error;

/// Result type for renderer operations
pub type RendererResult<T> = Result<T, RendererError>;

/// Errors raised while uploading textures or replaying draw data
#[derive(Debug, Error)]
pub enum RendererError {
    /// Texture payload did not match its declared format and extent
    #[error("Bad texture data: {0}")]
    BadTexture(String),

    /// A texture id was referenced that this renderer never issued
    #[error("Unknown texture id: {0}")]
    UnknownTexture(u64),

    /// Draw list offsets exceeded the index or vertex address space
    #[error("Draw list too large: {0}")]
    DrawListOverflow(String),
}
