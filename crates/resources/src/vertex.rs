//! Vertex layout shared by every generated mesh.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Vertex with position and normal.
///
/// # Memory Layout
///
/// - Offset 0: position (12 bytes)
/// - Offset 12: normal (12 bytes)
/// - Total size: 24 bytes
///
/// # Shader Locations
///
/// - location 0: position (vec3)
/// - location 1: normal (vec3)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in object space.
    pub position: Vec3,
    /// Surface normal (unit length).
    pub normal: Vec3,
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    #[inline]
    pub const fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        assert_eq!(Vertex::SIZE, 24);
        assert_eq!(std::mem::offset_of!(Vertex, normal), 12);
    }

    #[test]
    fn test_vertex_cast() {
        let vertices = [Vertex::new(Vec3::X, Vec3::Y), Vertex::new(Vec3::Z, Vec3::X)];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 2 * Vertex::SIZE);
    }
}
