//! The binding surface between the scene core and a concrete renderer.

use std::fmt;

use arbor_resources::ubo::{CameraUbo, LightsUbo, MaterialUbo, ObjectUbo};

use crate::error::RenderResult;

/// Uniform blocks a shader may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UniformBlock {
    /// [`CameraUbo`]
    Camera,
    /// [`ObjectUbo`]
    Object,
    /// [`MaterialUbo`]
    Material,
    /// [`LightsUbo`]
    Lights,
}

impl UniformBlock {
    /// Every block, in binding order.
    pub const ALL: [UniformBlock; 4] = [
        UniformBlock::Camera,
        UniformBlock::Object,
        UniformBlock::Material,
        UniformBlock::Lights,
    ];

    /// Byte size of the block's layout.
    pub const fn size(self) -> usize {
        match self {
            UniformBlock::Camera => CameraUbo::SIZE,
            UniformBlock::Object => ObjectUbo::SIZE,
            UniformBlock::Material => MaterialUbo::SIZE,
            UniformBlock::Lights => LightsUbo::SIZE,
        }
    }

    /// Name the block has in shader source.
    pub const fn shader_name(self) -> &'static str {
        match self {
            UniformBlock::Camera => "CameraData",
            UniformBlock::Object => "ObjectData",
            UniformBlock::Material => "MaterialData",
            UniformBlock::Lights => "LightData",
        }
    }
}

impl fmt::Display for UniformBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shader_name())
    }
}

/// Handle to a mesh uploaded to a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub u32);

/// Operations the scene core needs from a renderer.
///
/// The core never talks to a graphics API directly: materials write uniform
/// blocks, meshes issue indexed draws, and the camera writes its block on
/// activation.
pub trait RenderBackend {
    /// Register vertex and index data, returning a handle for later draws.
    fn upload_mesh(&mut self, label: &str, vertices: &[u8], indices: &[u32]) -> MeshId;

    /// Write a uniform block. Fails with
    /// [`ShaderUniformMissing`](crate::RenderError::ShaderUniformMissing)
    /// when the bound shader does not declare `block`.
    fn write_uniform(&mut self, block: UniformBlock, bytes: &[u8]) -> RenderResult<()>;

    /// Issue an indexed triangle draw of `index_count` indices.
    fn draw_indexed(&mut self, mesh: MeshId, index_count: u32) -> RenderResult<()>;
}
