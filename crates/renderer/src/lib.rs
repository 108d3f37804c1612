//! Renderer binding surface.
//!
//! This crate is the boundary between the scene core and a renderer:
//! - [`RenderBackend`] trait (uniform writes, mesh upload, indexed draws)
//! - [`RecordingBackend`] for headless runs and tests
//! - Uploaded meshes and material application
//! - Frame statistics

mod error;

pub mod backend;
pub mod frame;
pub mod material;
pub mod mesh;
pub mod recording;

pub use backend::{MeshId, RenderBackend, UniformBlock};
pub use error::{RenderError, RenderResult};
pub use frame::FrameStats;
pub use material::ApplyMaterial;
pub use mesh::GpuMesh;
pub use recording::{RecordingBackend, RenderCommand};
