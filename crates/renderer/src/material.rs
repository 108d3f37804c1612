//! Applying materials to a backend.

use arbor_resources::Material;
use arbor_resources::ubo::ObjectUbo;
use glam::Mat4;

use crate::backend::{RenderBackend, UniformBlock};
use crate::error::RenderError;

/// Something that can push its surface state for a draw.
pub trait ApplyMaterial {
    /// Write the object block for `world` and this material's block.
    ///
    /// Both blocks are attempted even if the first one fails. On failure
    /// every error is returned, in write order.
    fn apply(&self, backend: &mut dyn RenderBackend, world: &Mat4) -> Result<(), Vec<RenderError>>;
}

impl ApplyMaterial for Material {
    fn apply(&self, backend: &mut dyn RenderBackend, world: &Mat4) -> Result<(), Vec<RenderError>> {
        let object = ObjectUbo::new(*world);
        let material = self.to_ubo();

        let errors: Vec<RenderError> = [
            backend.write_uniform(UniformBlock::Object, bytemuck::bytes_of(&object)),
            backend.write_uniform(UniformBlock::Material, bytemuck::bytes_of(&material)),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
