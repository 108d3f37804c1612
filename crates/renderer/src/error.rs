//! Renderer binding errors.

use thiserror::Error;

use crate::backend::{MeshId, UniformBlock};

/// Errors reported by a [`RenderBackend`](crate::RenderBackend).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The bound shader does not declare the uniform block. Non-fatal: the
    /// caller logs it and keeps drawing with whatever state is bound.
    #[error("Shader uniform missing: {0}")]
    ShaderUniformMissing(UniformBlock),

    /// A draw referenced a mesh this backend never uploaded.
    #[error("Unknown mesh: {0:?}")]
    UnknownMesh(MeshId),

    /// A uniform write had the wrong number of bytes for its block.
    #[error("Uniform block {block} expects {expected} bytes, got {actual}")]
    UniformSize {
        block: UniformBlock,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for renderer operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for arbor_core::Error {
    fn from(err: RenderError) -> Self {
        arbor_core::Error::Render(err.to_string())
    }
}
