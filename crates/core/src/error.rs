//! Error types shared by the arbor crates.

use thiserror::Error;

/// Workspace-level error type.
///
/// Lower crates keep their own error enums and convert into this one at the
/// driver boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// Mesh generation or other resource errors
    #[error("Resource error: {0}")]
    Resource(String),

    /// Renderer binding errors
    #[error("Render error: {0}")]
    Render(String),

    /// Scene graph, transform and camera errors
    #[error("Scene error: {0}")]
    Scene(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using the workspace Error type.
pub type Result<T> = std::result::Result<T, Error>;
