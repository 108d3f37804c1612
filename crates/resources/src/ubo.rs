//! Uniform block layouts written to the renderer.
//!
//! All structures use `#[repr(C)]` and implement `bytemuck::Pod` so they can
//! be handed to a backend as raw bytes. Sizes are multiples of 16 bytes and
//! `Vec3` members are followed by a scalar, matching std140 packing.
//!
//! - [`CameraUbo`] projection and view state pushed by camera activation
//! - [`ObjectUbo`] per-node world transform and normal matrix
//! - [`MaterialUbo`] Phong surface parameters
//! - [`LightUbo`] / [`LightsUbo`] lights gathered before geometry is drawn
//!
//! # Example
//!
//! ```
//! use arbor_resources::ubo::{CameraUbo, ObjectUbo};
//! use glam::{Mat4, Vec3};
//!
//! let camera = CameraUbo::new(
//!     Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
//!     Mat4::perspective_rh_gl(45.0_f32.to_radians(), 4.0 / 3.0, 0.1, 100.0),
//!     Vec3::new(0.0, 0.0, 5.0),
//! );
//! let object = ObjectUbo::new(Mat4::IDENTITY);
//!
//! let camera_bytes: &[u8] = bytemuck::bytes_of(&camera);
//! let object_bytes: &[u8] = bytemuck::bytes_of(&object);
//! assert_eq!(camera_bytes.len(), CameraUbo::SIZE);
//! assert_eq!(object_bytes.len(), ObjectUbo::SIZE);
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

/// Maximum number of lights gathered per frame.
pub const MAX_LIGHTS: usize = 4;

/// Camera uniform block.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 64   | view |
/// | 64     | 64   | projection |
/// | 128    | 64   | view_projection |
/// | 192    | 12   | camera_position |
/// | 204    | 4    | _padding |
///
/// Total size: 208 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct CameraUbo {
    /// World to view space.
    pub view: Mat4,
    /// View to clip space.
    pub projection: Mat4,
    /// Pre-computed `projection * view`.
    pub view_projection: Mat4,
    /// Eye position in world space, used for specular terms.
    pub camera_position: Vec3,
    pub _padding: f32,
}

impl CameraUbo {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    #[inline]
    pub fn new(view: Mat4, projection: Mat4, camera_position: Vec3) -> Self {
        Self {
            view,
            projection,
            view_projection: projection * view,
            camera_position,
            _padding: 0.0,
        }
    }
}

/// Per-object uniform block.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 64   | model |
/// | 64     | 64   | normal_matrix |
///
/// Total size: 128 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ObjectUbo {
    /// Object to world space (the node's world transform).
    pub model: Mat4,
    /// Inverse transpose of `model`; only the upper 3x3 is meaningful.
    pub normal_matrix: Mat4,
}

impl ObjectUbo {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    #[inline]
    pub fn new(model: Mat4) -> Self {
        Self {
            model,
            normal_matrix: Self::compute_normal_matrix(model),
        }
    }

    /// Transpose of the inverse of `model`.
    ///
    /// A singular model matrix (zero scale on some axis) yields the identity
    /// instead of NaN/Inf values.
    #[inline]
    pub fn compute_normal_matrix(model: Mat4) -> Mat4 {
        const EPSILON: f32 = 1e-6;
        let det = model.determinant();

        if det.abs() < EPSILON || !det.is_finite() {
            Mat4::IDENTITY
        } else {
            model.inverse().transpose()
        }
    }
}

/// Phong material uniform block.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 16   | diffuse |
/// | 16     | 12   | specular |
/// | 28     | 4    | shininess |
/// | 32     | 12   | emissive |
/// | 44     | 4    | _padding |
///
/// Total size: 48 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MaterialUbo {
    pub diffuse: Vec4,
    pub specular: Vec3,
    pub shininess: f32,
    pub emissive: Vec3,
    pub _padding: f32,
}

impl MaterialUbo {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    #[inline]
    pub fn new(diffuse: Vec4, specular: Vec3, emissive: Vec3, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
            emissive,
            _padding: 0.0,
        }
    }
}

/// A single light.
///
/// `position.w == 0` marks a directional light whose `xyz` is the direction
/// towards the light; `position.w == 1` marks a point light at `xyz`.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 16   | position |
/// | 16     | 12   | color |
/// | 28     | 4    | attenuation |
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightUbo {
    pub position: Vec4,
    pub color: Vec3,
    /// Linear attenuation factor, `0` disables falloff
    pub attenuation: f32,
}

impl LightUbo {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Point light at `position`.
    #[inline]
    pub fn point(position: Vec3, color: Vec3, attenuation: f32) -> Self {
        Self {
            position: position.extend(1.0),
            color,
            attenuation,
        }
    }

    /// Directional light shining along `direction`.
    ///
    /// Zero-length directions stay zero instead of producing NaN.
    #[inline]
    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self {
            position: (-direction.normalize_or_zero()).extend(0.0),
            color,
            attenuation: 0.0,
        }
    }

    /// Whether this is a directional light.
    #[inline]
    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }
}

/// All lights for a frame.
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0      | 128  | lights |
/// | 128    | 4    | count |
/// | 132    | 12   | _padding |
///
/// Total size: 144 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct LightsUbo {
    pub lights: [LightUbo; MAX_LIGHTS],
    pub count: u32,
    pub _padding: [u32; 3],
}

impl LightsUbo {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Append a light. Returns `false` when the block is already full.
    pub fn push(&mut self, light: LightUbo) -> bool {
        let index = self.count as usize;
        if index >= MAX_LIGHTS {
            return false;
        }
        self.lights[index] = light;
        self.count += 1;
        true
    }

    /// The lights that were pushed.
    pub fn active(&self) -> &[LightUbo] {
        &self.lights[..self.count as usize]
    }
}
