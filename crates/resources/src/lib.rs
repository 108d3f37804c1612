//! CPU-side resources.
//!
//! This crate holds data that does not depend on a renderer:
//! - Parametric mesh generators
//! - Vertex layout
//! - Material definitions
//! - Uniform block layouts

mod error;

pub mod material;
pub mod mesh;
pub mod ubo;
pub mod vertex;

pub use error::{ResourceError, ResourceResult};
pub use material::{EmissiveMaterial, Material, MonochromeMaterial};
pub use mesh::Mesh;
pub use vertex::Vertex;
