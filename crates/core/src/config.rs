//! Runtime configuration.
//!
//! Defaults match the lab canvas (800x600, 45 degree field of view,
//! 0.1..100 clip range). [`Config::from_env`] overlays `ARBOR_*` variables.

use crate::logging::DEFAULT_FILTER;
use crate::{Error, Result};

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Width divided by height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Perspective camera settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Top-level configuration for the arbor driver.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub viewport: Viewport,
    pub camera: CameraConfig,
    /// Frames to run in headless mode
    pub frames: u32,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            camera: CameraConfig::default(),
            frames: 120,
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with `ARBOR_VIEWPORT`, `ARBOR_FOV`, `ARBOR_FRAMES`
    /// and `ARBOR_LOG` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values produced by `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("ARBOR_VIEWPORT") {
            config.viewport = parse_viewport(&value)?;
        }
        if let Some(value) = lookup("ARBOR_FOV") {
            config.camera.fov_degrees = value
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("ARBOR_FOV is not a number: '{value}'")))?;
        }
        if let Some(value) = lookup("ARBOR_FRAMES") {
            config.frames = value
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("ARBOR_FRAMES is not a count: '{value}'")))?;
        }
        if let Some(value) = lookup("ARBOR_LOG") {
            config.log_filter = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values that would otherwise fail later at camera creation.
    pub fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        let CameraConfig {
            fov_degrees,
            near,
            far,
        } = self.camera;
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(Error::Config(format!(
                "camera fov must be in (0, 180) degrees, got {fov_degrees}"
            )));
        }
        if !(near > 0.0 && near < far && far.is_finite()) {
            return Err(Error::Config(format!(
                "camera clip planes must satisfy 0 < near < far, got near={near} far={far}"
            )));
        }
        Ok(())
    }
}

fn parse_viewport(value: &str) -> Result<Viewport> {
    let invalid = || Error::Config(format!("ARBOR_VIEWPORT must look like 800x600, got '{value}'"));

    let (width, height) = value.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    Ok(Viewport {
        width: width.parse().map_err(|_| invalid())?,
        height: height.parse().map_err(|_| invalid())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!((config.viewport.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("ARBOR_VIEWPORT", "1280x720"),
            ("ARBOR_FOV", "60"),
            ("ARBOR_FRAMES", "3"),
            ("ARBOR_LOG", "warn"),
        ]))
        .expect("valid overrides");

        assert_eq!(config.viewport, Viewport { width: 1280, height: 720 });
        assert_eq!(config.camera.fov_degrees, 60.0);
        assert_eq!(config.frames, 3);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_malformed_viewport() {
        let result = Config::from_lookup(lookup_from(&[("ARBOR_VIEWPORT", "wide")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_out_of_range_fov() {
        let result = Config::from_lookup(lookup_from(&[("ARBOR_FOV", "180")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_viewport() {
        let mut config = Config::default();
        config.viewport.height = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
