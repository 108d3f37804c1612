//! Affine transform value type.
//!
//! [`Transform`] wraps a 4x4 matrix that is always affine (bottom row
//! `[0, 0, 0, 1]`). Composition follows the column-vector convention:
//! `a.multiply(&b)` applies `b` first, then `a`.
//!
//! # Example
//!
//! ```
//! use arbor_scene::Transform;
//! use glam::Vec3;
//!
//! let parent_world = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
//! let child_local = Transform::from_translation(Vec3::new(0.0, 1.0, 0.0));
//!
//! // World of the child: parent world composed with the child's local.
//! let child_world = parent_world * child_local;
//! assert!((child_world.translation() - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
//! ```

use std::ops::Mul;

use glam::{Mat4, Quat, Vec3, Vec4};

use crate::error::{SceneError, SceneResult};

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-8;

/// A 4x4 affine transform.
///
/// Operations take their inputs by value and return new values, so passing
/// the same transform as both operands is always safe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            matrix: Mat4::from_translation(translation),
        }
    }

    /// Rotation by a quaternion. The quaternion is normalized first.
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            matrix: Mat4::from_quat(rotation.normalize()),
        }
    }

    /// Rotation of `angle` radians about `axis`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> SceneResult<Self> {
        let axis = axis
            .try_normalize()
            .ok_or(SceneError::InvalidAxis(axis.to_array()))?;
        Ok(Self {
            matrix: Mat4::from_axis_angle(axis, angle),
        })
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self {
            matrix: Mat4::from_scale(scale),
        }
    }

    /// Scale, then rotate, then translate.
    pub fn from_scale_rotation_translation(scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        Self {
            matrix: Mat4::from_scale_rotation_translation(scale, rotation.normalize(), translation),
        }
    }

    /// Wrap a matrix, rejecting projective or non-finite ones.
    pub fn from_mat4(matrix: Mat4) -> SceneResult<Self> {
        if matrix.row(3) != Vec4::W || !matrix.is_finite() {
            return Err(SceneError::NonAffineTransform);
        }
        Ok(Self { matrix })
    }

    /// Column-major values, the layout GLSL uses.
    pub fn from_cols_array(values: &[f32; 16]) -> SceneResult<Self> {
        Self::from_mat4(Mat4::from_cols_array(values))
    }

    /// The underlying matrix.
    pub fn as_mat4(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn to_mat4(self) -> Mat4 {
        self.matrix
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.matrix.to_cols_array()
    }

    /// `self ∘ rhs`: apply `rhs` first, then `self`.
    #[must_use]
    pub fn multiply(&self, rhs: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * rhs.matrix,
        }
    }

    /// The inverse transform, or `SingularTransform` if there is none.
    pub fn try_inverse(&self) -> SceneResult<Transform> {
        let determinant = self.matrix.determinant();
        if determinant.abs() < SINGULAR_EPSILON || !determinant.is_finite() {
            return Err(SceneError::SingularTransform { determinant });
        }
        Ok(Transform {
            matrix: self.matrix.inverse(),
        })
    }

    /// `self ∘ translation(v)`: translate along this transform's local axes.
    #[must_use]
    pub fn translate(self, v: Vec3) -> Transform {
        self * Transform::from_translation(v)
    }

    /// `self ∘ rotation(q)`.
    #[must_use]
    pub fn rotate(self, rotation: Quat) -> Transform {
        self * Transform::from_rotation(rotation)
    }

    #[must_use]
    pub fn rotate_x(self, angle: f32) -> Transform {
        self.rotate(Quat::from_rotation_x(angle))
    }

    #[must_use]
    pub fn rotate_y(self, angle: f32) -> Transform {
        self.rotate(Quat::from_rotation_y(angle))
    }

    #[must_use]
    pub fn rotate_z(self, angle: f32) -> Transform {
        self.rotate(Quat::from_rotation_z(angle))
    }

    /// `self ∘ scale(v)`.
    #[must_use]
    pub fn scale(self, v: Vec3) -> Transform {
        self * Transform::from_scale(v)
    }

    /// Translation component (where the local origin lands).
    pub fn translation(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.matrix.transform_point3(point)
    }

    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.matrix.transform_vector3(vector)
    }

    /// Element-wise comparison with tolerance.
    pub fn abs_diff_eq(&self, other: &Transform, max_abs_diff: f32) -> bool {
        self.matrix.abs_diff_eq(other.matrix, max_abs_diff)
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.multiply(&rhs)
    }
}

impl Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Transform {
        self.multiply(rhs)
    }
}

impl From<Transform> for Mat4 {
    fn from(transform: Transform) -> Self {
        transform.matrix
    }
}

impl TryFrom<Mat4> for Transform {
    type Error = SceneError;

    fn try_from(matrix: Mat4) -> SceneResult<Self> {
        Transform::from_mat4(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t, Transform::default());
        assert_eq!(t.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_multiply_applies_right_operand_first() {
        let translate = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let rotate = Transform::from_rotation(Quat::from_rotation_z(FRAC_PI_2));

        // Translate first, then rotate the translated point about the origin.
        let rotate_after = rotate * translate;
        assert!(approx_eq_vec3(
            rotate_after.transform_point(Vec3::ZERO),
            Vec3::new(0.0, 1.0, 0.0)
        ));

        // Rotate first (no effect on the origin), then translate.
        let translate_after = translate * rotate;
        assert!(approx_eq_vec3(
            translate_after.transform_point(Vec3::ZERO),
            Vec3::new(1.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn test_multiply_is_associative() {
        let a = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let b = Transform::from_rotation(Quat::from_rotation_y(0.3));
        let c = Transform::from_scale(Vec3::new(2.0, 1.0, 0.5));

        assert!(((a * b) * c).abs_diff_eq(&(a * (b * c)), EPSILON));
    }

    #[test]
    fn test_self_multiply_is_not_aliased() {
        let t = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)).rotate_z(0.5);
        let squared = t.multiply(&t);
        let expected = Transform::from_mat4(t.to_mat4() * t.to_mat4()).unwrap();
        assert!(squared.abs_diff_eq(&expected, EPSILON));
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::from_scale_rotation_translation(
            Vec3::new(2.0, 3.0, 0.5),
            Quat::from_rotation_x(0.7),
            Vec3::new(-4.0, 1.0, 9.0),
        );
        let inverse = t.try_inverse().unwrap();

        assert!((t * inverse).abs_diff_eq(&Transform::IDENTITY, 1e-4));
        assert!((inverse * t).abs_diff_eq(&Transform::IDENTITY, 1e-4));
    }

    #[test]
    fn test_inverse_of_singular_fails() {
        let flat = Transform::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert!(matches!(
            flat.try_inverse(),
            Err(SceneError::SingularTransform { .. })
        ));
    }

    #[test]
    fn test_from_mat4_rejects_projection() {
        let projection = Mat4::perspective_rh_gl(1.0, 1.0, 0.1, 10.0);
        assert_eq!(
            Transform::from_mat4(projection),
            Err(SceneError::NonAffineTransform)
        );

        let mut values = Mat4::IDENTITY.to_cols_array();
        values[12] = f32::NAN;
        assert_eq!(
            Transform::from_cols_array(&values),
            Err(SceneError::NonAffineTransform)
        );
    }

    #[test]
    fn test_from_cols_array_reads_translation_from_last_column() {
        let t = Transform::from_cols_array(&[
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, -2.0, 10.0, 1.0,
        ])
        .unwrap();
        assert_eq!(t.translation(), Vec3::new(0.0, -2.0, 10.0));
    }

    #[test]
    fn test_axis_angle_rejects_zero_axis() {
        assert!(matches!(
            Transform::from_axis_angle(Vec3::ZERO, 1.0),
            Err(SceneError::InvalidAxis(_))
        ));
        let t = Transform::from_axis_angle(Vec3::new(0.0, 2.0, 0.0), FRAC_PI_2).unwrap();
        assert!(approx_eq_vec3(t.transform_point(Vec3::X), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_composers_apply_in_local_space() {
        // Rotate 90 degrees about Y, then translate along the rotated X axis.
        let t = Transform::identity().rotate_y(FRAC_PI_2).translate(Vec3::X);
        assert!(approx_eq_vec3(t.translation(), Vec3::new(0.0, 0.0, -1.0)));

        let scaled = Transform::from_translation(Vec3::X).scale(Vec3::splat(2.0));
        assert!(approx_eq_vec3(scaled.transform_point(Vec3::X), Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_composition_stays_affine() {
        let t = Transform::from_translation(Vec3::ONE)
            .rotate_x(0.3)
            .scale(Vec3::new(1.0, 2.0, 3.0))
            .rotate_z(-1.2);
        assert_eq!(t.to_mat4().row(3), Vec4::W);
        assert!(Transform::from_mat4(t.to_mat4()).is_ok());
    }
}
