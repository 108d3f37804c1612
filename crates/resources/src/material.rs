//! Material definitions.
//!
//! Materials are plain data; writing them to a renderer lives in
//! `arbor-renderer`.

use glam::{Vec3, Vec4};

use crate::ubo::MaterialUbo;

/// Phong surface with a single diffuse colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonochromeMaterial {
    /// Diffuse colour (alpha is carried through to the fragment)
    pub diffuse: Vec4,
    /// Specular highlight colour
    pub specular: Vec3,
    /// Colour added regardless of lighting
    pub emissive: Vec3,
    /// Phong specular exponent
    pub shininess: f32,
}

impl MonochromeMaterial {
    /// Opaque material with a dim specular highlight and no emission.
    pub fn new(diffuse: Vec4) -> Self {
        Self {
            diffuse,
            ..Self::default()
        }
    }

    pub fn with_specular(mut self, specular: Vec3) -> Self {
        self.specular = specular;
        self
    }

    pub fn with_emissive(mut self, emissive: Vec3) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Default for MonochromeMaterial {
    fn default() -> Self {
        Self {
            diffuse: Vec4::ONE,
            specular: Vec3::splat(0.3),
            emissive: Vec3::ZERO,
            shininess: 16.0,
        }
    }
}

/// Self-lit surface, e.g. the visible body of a light source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissiveMaterial {
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for EmissiveMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Material kinds a drawable node can carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Monochrome(MonochromeMaterial),
    Emissive(EmissiveMaterial),
}

impl Material {
    /// Shorthand for an opaque monochrome material.
    pub fn monochrome(diffuse: Vec4) -> Self {
        Self::Monochrome(MonochromeMaterial::new(diffuse))
    }

    /// Shorthand for an emissive material.
    pub fn emissive(color: Vec3, intensity: f32) -> Self {
        Self::Emissive(EmissiveMaterial { color, intensity })
    }

    /// Uniform block for this material.
    ///
    /// Emissive materials have no diffuse or specular response; their
    /// colour goes entirely into the emissive term.
    pub fn to_ubo(&self) -> MaterialUbo {
        match *self {
            Material::Monochrome(m) => {
                MaterialUbo::new(m.diffuse, m.specular, m.emissive, m.shininess)
            }
            Material::Emissive(e) => MaterialUbo::new(
                Vec4::new(0.0, 0.0, 0.0, 1.0),
                Vec3::ZERO,
                e.color * e.intensity,
                1.0,
            ),
        }
    }
}

impl From<MonochromeMaterial> for Material {
    fn from(material: MonochromeMaterial) -> Self {
        Material::Monochrome(material)
    }
}

impl From<EmissiveMaterial> for Material {
    fn from(material: EmissiveMaterial) -> Self {
        Material::Emissive(material)
    }
}
