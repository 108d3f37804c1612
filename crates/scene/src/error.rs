//! Scene graph error types.

use arbor_renderer::RenderError;
use thiserror::Error;

/// Error type for transform, graph and camera operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Inversion was requested for a transform without an inverse.
    #[error("Transform is singular (determinant {determinant})")]
    SingularTransform {
        /// Determinant of the rejected matrix.
        determinant: f32,
    },

    /// A matrix was not an affine transform (bottom row other than
    /// `[0, 0, 0, 1]` or non-finite entries).
    #[error("Matrix is not a finite affine transform")]
    NonAffineTransform,

    /// A rotation axis was zero-length or not finite.
    #[error("Rotation axis {0:?} cannot be normalized")]
    InvalidAxis([f32; 3]),

    /// Camera construction or resize with out-of-range parameters.
    #[error("Invalid camera parameters: {0}")]
    InvalidCameraParameters(String),

    /// A node was drawn or queried before its world transform was computed
    /// from the root.
    #[error("World transform of node '{name}' (#{index}) has not been computed")]
    WorldTransformNotComputed { name: String, index: usize },

    /// A node id that does not belong to this graph.
    #[error("Node #{0} does not exist in this scene graph")]
    NodeNotFound(usize),

    /// `add_child` on a node that already has a parent.
    #[error("Node '{child}' already has parent '{parent}'")]
    AlreadyParented { child: String, parent: String },

    /// Attaching a node below itself.
    #[error("Attaching '{child}' under '{parent}' would create a cycle")]
    CyclicAttachment { child: String, parent: String },

    /// The backend rejected a draw or uniform write.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Result type alias for scene operations.
pub type SceneResult<T> = std::result::Result<T, SceneError>;

impl From<SceneError> for arbor_core::Error {
    fn from(err: SceneError) -> Self {
        arbor_core::Error::Scene(err.to_string())
    }
}
