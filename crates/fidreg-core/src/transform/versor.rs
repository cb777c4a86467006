//! Versor Rigid transform implementation.
//!
//! This module provides a versor rigid transform (quaternion rotation + translation).
//! It is robust against Gimbal lock and is suitable for 3D registration.

use nalgebra::{Quaternion, UnitQuaternion};

use crate::spatial::{Point, Point3, Vector, Vector3};
use super::error::TransformError;
use super::trait_::Transform;

/// Versor Rigid Transform (Quaternion Rotation + Translation).
///
/// Supports 3D only.
/// Includes a fixed center of rotation: T(x) = R(x - c) + c + t
///
/// The parameter vector follows the ITK ordering
/// `[vx, vy, vz, tx, ty, tz]` where `(vx, vy, vz)` is the vector part of
/// the unit quaternion; the scalar part is recovered as
/// `sqrt(1 - vx^2 - vy^2 - vz^2)`.
#[derive(Debug, Clone)]
pub struct VersorRigid3DTransform {
    versor: UnitQuaternion<f64>,
    translation: Vector3,
    center: Point3,
}

impl VersorRigid3DTransform {
    /// Create a new versor rigid transform.
    ///
    /// # Arguments
    /// * `versor` - Unit quaternion describing the rotation
    /// * `translation` - Translation vector
    /// * `center` - Fixed center of rotation
    pub fn new(versor: UnitQuaternion<f64>, translation: Vector3, center: Point3) -> Self {
        Self { versor, translation, center }
    }

    /// Create an identity transform (no rotation, no translation).
    pub fn identity() -> Self {
        Self::new(UnitQuaternion::identity(), Vector3::zeros(), Point3::origin())
    }

    /// Get the rotation versor.
    pub fn versor(&self) -> UnitQuaternion<f64> {
        self.versor
    }

    /// Get the translation vector.
    pub fn translation(&self) -> Vector3 {
        self.translation
    }

    /// Get the center of rotation.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Parameter vector `[vx, vy, vz, tx, ty, tz]`.
    ///
    /// The versor is reported with a non-negative scalar part, so the
    /// vector part alone determines the rotation.
    pub fn parameters(&self) -> Vec<f64> {
        let q = self.versor.quaternion();
        let sign = if q.w < 0.0 { -1.0 } else { 1.0 };
        vec![
            sign * q.i,
            sign * q.j,
            sign * q.k,
            self.translation[0],
            self.translation[1],
            self.translation[2],
        ]
    }

    /// Build a transform from `[vx, vy, vz, tx, ty, tz]` with the given fixed center.
    pub fn from_parameters(params: &[f64], center: Point3) -> Result<Self, TransformError> {
        if params.len() != 6 {
            return Err(TransformError::ParameterLength {
                expected: 6,
                actual: params.len(),
            });
        }

        let norm_squared = params[0] * params[0] + params[1] * params[1] + params[2] * params[2];
        if norm_squared > 1.0 + 1e-12 {
            return Err(TransformError::InvalidVersor { norm: norm_squared.sqrt() });
        }

        let w = (1.0 - norm_squared).max(0.0).sqrt();
        let versor = UnitQuaternion::from_quaternion(Quaternion::new(
            w, params[0], params[1], params[2],
        ));
        Ok(Self::new(
            versor,
            Vector3::new([params[3], params[4], params[5]]),
            center,
        ))
    }
}

impl Transform<3> for VersorRigid3DTransform {
    fn transform_point(&self, point: &Point3) -> Point3 {
        let centered = point.0 - self.center.0;
        Point(self.center.0 + self.versor * centered + self.translation.0)
    }

    fn inverse(&self) -> Option<Box<dyn Transform<3>>> {
        let inverse_versor = self.versor.inverse();
        let inv_translation = -(inverse_versor * self.translation.0);
        Some(Box::new(Self::new(
            inverse_versor,
            Vector(inv_translation),
            self.center,
        )))
    }
}
