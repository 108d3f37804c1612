//! Perspective fly camera.
//!
//! The camera keeps a view transform (world to camera space) and an
//! OpenGL-style right-handed perspective projection. [`Camera::update`]
//! moves it like a free-flying observer: it turns about its own position,
//! then moves along its own (rotated) axes.

use arbor_renderer::{RenderBackend, RenderError, UniformBlock};
use arbor_resources::ubo::CameraUbo;
use glam::{Mat4, Quat, Vec3};
use tracing::warn;

use crate::error::{SceneError, SceneResult};
use crate::transform::Transform;

/// Perspective projection parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    fn validate(&self) -> SceneResult<()> {
        let Perspective {
            fov_degrees,
            aspect,
            near,
            far,
        } = *self;
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(SceneError::InvalidCameraParameters(format!(
                "field of view must be in (0, 180) degrees, got {fov_degrees}"
            )));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(SceneError::InvalidCameraParameters(format!(
                "aspect ratio must be positive, got {aspect}"
            )));
        }
        if !(near > 0.0 && near < far && far.is_finite()) {
            return Err(SceneError::InvalidCameraParameters(format!(
                "clip planes must satisfy 0 < near < far, got near={near} far={far}"
            )));
        }
        Ok(())
    }

    fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    params: Perspective,
    projection: Mat4,
    view: Transform,
}

impl Camera {
    /// A camera at the origin looking down -Z.
    ///
    /// Fails with `InvalidCameraParameters` unless `0 < fov < 180`,
    /// `aspect > 0` and `0 < near < far`; values are never clamped.
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> SceneResult<Self> {
        let params = Perspective {
            fov_degrees,
            aspect,
            near,
            far,
        };
        params.validate()?;
        Ok(Self {
            params,
            projection: params.matrix(),
            view: Transform::IDENTITY,
        })
    }

    /// Place the camera at `eye` looking at `target`.
    pub fn look_at(mut self, eye: Vec3, target: Vec3, up: Vec3) -> SceneResult<Self> {
        let forward = target - eye;
        let parallel = forward.cross(up).length_squared() < f32::EPSILON;
        if forward.length_squared() < f32::EPSILON || parallel {
            return Err(SceneError::InvalidCameraParameters(format!(
                "cannot look from {eye} towards {target} with up {up}"
            )));
        }
        self.view = Transform::from_mat4(Mat4::look_at_rh(eye, target, up))?;
        Ok(self)
    }

    /// Use `view` as the world to camera transform. It must be invertible.
    pub fn with_view(mut self, view: Transform) -> SceneResult<Self> {
        view.try_inverse()?;
        self.view = view;
        Ok(self)
    }

    /// Resize hook: replace the aspect ratio, keeping the other parameters.
    pub fn set_aspect(&mut self, aspect: f32) -> SceneResult<()> {
        let params = Perspective {
            aspect,
            ..self.params
        };
        params.validate()?;
        self.params = params;
        self.projection = params.matrix();
        Ok(())
    }

    /// Turn by `pitch` (about the camera's X axis) and `yaw` (about its Y
    /// axis), then move by `translation` in the turned camera's space.
    ///
    /// `view = T(-translation) ∘ R(pitch, yaw)⁻¹ ∘ view`
    pub fn update(&mut self, translation: Vec3, pitch: f32, yaw: f32) {
        let rotation = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch);
        let step = Transform::from_translation(-translation)
            .multiply(&Transform::from_rotation(rotation.conjugate()));
        self.view = step.multiply(&self.view);
    }

    /// Write the camera uniform block. A shader without the block only
    /// produces a warning.
    pub fn activate(&self, backend: &mut dyn RenderBackend) -> SceneResult<()> {
        let ubo = CameraUbo::new(self.view.to_mat4(), self.projection, self.eye_position());
        match backend.write_uniform(UniformBlock::Camera, bytemuck::bytes_of(&ubo)) {
            Ok(()) => Ok(()),
            Err(RenderError::ShaderUniformMissing(block)) => {
                warn!(%block, "camera block not declared by shader");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn view_transform(&self) -> Transform {
        self.view
    }

    pub fn projection_transform(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view.to_mat4()
    }

    pub fn params(&self) -> Perspective {
        self.params
    }

    /// Camera position in world space.
    pub fn eye_position(&self) -> Vec3 {
        self.camera_to_world().w_axis.truncate()
    }

    /// Direction the camera looks, in world space.
    pub fn forward(&self) -> Vec3 {
        self.camera_to_world().transform_vector3(Vec3::NEG_Z).normalize_or_zero()
    }

    pub fn right(&self) -> Vec3 {
        self.camera_to_world().transform_vector3(Vec3::X).normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.camera_to_world().transform_vector3(Vec3::Y).normalize_or_zero()
    }

    fn camera_to_world(&self) -> Mat4 {
        // Rigid updates keep the checked view invertible.
        self.view.to_mat4().inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_renderer::RecordingBackend;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-4;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    fn camera() -> Camera {
        Camera::perspective(45.0, 4.0 / 3.0, 0.1, 100.0).unwrap()
    }

    #[test]
    fn test_perspective_rejects_bad_parameters() {
        for (fov, aspect, near, far) in [
            (0.0, 1.0, 0.1, 10.0),
            (180.0, 1.0, 0.1, 10.0),
            (45.0, 0.0, 0.1, 10.0),
            (45.0, 1.0, 0.0, 10.0),
            (45.0, 1.0, 10.0, 1.0),
            (45.0, 1.0, 0.1, f32::INFINITY),
            (f32::NAN, 1.0, 0.1, 10.0),
        ] {
            assert!(
                matches!(
                    Camera::perspective(fov, aspect, near, far),
                    Err(SceneError::InvalidCameraParameters(_))
                ),
                "accepted fov={fov} aspect={aspect} near={near} far={far}"
            );
        }
    }

    #[test]
    fn test_projection_is_gl_style() {
        let cam = camera();
        let expected = Mat4::perspective_rh_gl(45.0_f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        assert_eq!(cam.projection_transform(), expected);
    }

    #[test]
    fn test_set_aspect_keeps_old_value_on_error() {
        let mut cam = camera();
        cam.set_aspect(2.0).unwrap();
        assert_eq!(cam.params().aspect, 2.0);

        assert!(cam.set_aspect(-1.0).is_err());
        assert_eq!(cam.params().aspect, 2.0);
    }

    #[test]
    fn test_zero_update_leaves_view_unchanged() {
        let mut cam = camera()
            .look_at(Vec3::new(0.0, 2.0, 8.0), Vec3::ZERO, Vec3::Y)
            .unwrap();
        let before = cam.view_transform();

        cam.update(Vec3::ZERO, 0.0, 0.0);

        assert!(cam.view_transform().abs_diff_eq(&before, 1e-6));
    }

    #[test]
    fn test_pure_rotation_keeps_eye() {
        let mut cam = camera()
            .look_at(Vec3::new(3.0, 1.0, 5.0), Vec3::ZERO, Vec3::Y)
            .unwrap();
        let eye = cam.eye_position();

        cam.update(Vec3::ZERO, 0.2, -0.7);

        assert!(approx_eq_vec3(cam.eye_position(), eye));
    }

    #[test]
    fn test_translation_follows_yaw() {
        let mut cam = camera();

        // Turn left a quarter, then step forward.
        cam.update(Vec3::new(0.0, 0.0, -1.0), 0.0, FRAC_PI_2);

        assert!(approx_eq_vec3(cam.eye_position(), Vec3::new(-1.0, 0.0, 0.0)));
        assert!(approx_eq_vec3(cam.forward(), Vec3::NEG_X));
    }

    #[test]
    fn test_look_at_rejects_degenerate_basis() {
        assert!(camera().look_at(Vec3::ONE, Vec3::ONE, Vec3::Y).is_err());
        assert!(camera().look_at(Vec3::ZERO, Vec3::Y, Vec3::Y).is_err());
    }

    #[test]
    fn test_with_view_rejects_singular() {
        let flat = Transform::from_scale(Vec3::new(1.0, 1.0, 0.0));
        assert!(matches!(
            camera().with_view(flat),
            Err(SceneError::SingularTransform { .. })
        ));
    }

    #[test]
    fn test_activate_writes_camera_block() {
        let cam = camera()
            .look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y)
            .unwrap();
        let mut backend = RecordingBackend::new();

        cam.activate(&mut backend).unwrap();

        let ubo: CameraUbo = backend.last_uniform(UniformBlock::Camera).unwrap();
        assert_eq!(ubo.view, cam.view_transform().to_mat4());
        assert_eq!(ubo.view_projection, cam.view_projection());
        assert!(approx_eq_vec3(ubo.camera_position, Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_activate_without_camera_block() {
        let cam = camera();
        let mut backend = RecordingBackend::new().without_block(UniformBlock::Camera);

        assert!(cam.activate(&mut backend).is_ok());
        assert!(backend.commands().is_empty());
    }
}
