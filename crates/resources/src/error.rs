//! Error types for resource creation.

use thiserror::Error;

/// Error type for resource operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// A parametric mesh generator was given parameters it cannot build from.
    #[error("Invalid parameters for {mesh} mesh: {reason}")]
    InvalidMeshParameters {
        /// Generator name (e.g. "star").
        mesh: &'static str,
        /// What was wrong.
        reason: String,
    },
}

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

impl From<ResourceError> for arbor_core::Error {
    fn from(err: ResourceError) -> Self {
        arbor_core::Error::Resource(err.to_string())
    }
}
