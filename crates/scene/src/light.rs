//! Light component attached to scene nodes.
//!
//! A light has no transform of its own: a point light sits at its node's
//! world translation, a directional light's direction is rotated by its
//! node's world transform. Lights are gathered before geometry is drawn.

use arbor_resources::ubo::LightUbo;
use glam::Vec3;

use crate::transform::Transform;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Omnidirectional light at the owning node's origin.
    Point {
        color: Vec3,
        /// Linear attenuation factor, `0` disables falloff
        attenuation: f32,
    },
    /// Light arriving from infinitely far away.
    Directional {
        color: Vec3,
        /// Direction the light travels, in the owning node's space
        direction: Vec3,
    },
}

impl Light {
    pub fn point(color: Vec3) -> Self {
        Light::Point {
            color,
            attenuation: 0.0,
        }
    }

    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Light::Directional { color, direction }
    }

    pub fn color(&self) -> Vec3 {
        match *self {
            Light::Point { color, .. } | Light::Directional { color, .. } => color,
        }
    }

    /// Uniform data for this light placed by `world`.
    pub fn to_ubo(&self, world: &Transform) -> LightUbo {
        match *self {
            Light::Point { color, attenuation } => {
                LightUbo::point(world.translation(), color, attenuation)
            }
            Light::Directional { color, direction } => {
                LightUbo::directional(world.transform_vector(direction), color)
            }
        }
    }
}
