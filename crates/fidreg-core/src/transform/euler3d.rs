//! Rigid 3D transform parametrized by Euler angles.

use nalgebra::Rotation3;

use crate::spatial::{Point, Point3, Vector, Vector3};
use super::error::TransformError;
use super::trait_::Transform;

/// Rigid 3D Transform (Euler-angle rotation + translation).
///
/// Rotation uses the ZYX convention, R = Rz(az) * Ry(ay) * Rx(ax).
/// Includes a fixed center of rotation: T(x) = R(x - c) + c + t
///
/// The parameter vector follows the ITK ordering
/// `[ax, ay, az, tx, ty, tz]` (angles in radians); the center is a fixed
/// parameter and is not part of the vector.
#[derive(Debug, Clone)]
pub struct Euler3DTransform {
    angles: [f64; 3],
    translation: Vector3,
    center: Point3,
}

impl Euler3DTransform {
    /// Create a new rigid 3D transform.
    ///
    /// # Arguments
    /// * `angles` - Euler angles `[ax, ay, az]` in radians (ZYX convention)
    /// * `translation` - Translation vector
    /// * `center` - Fixed center of rotation
    pub fn new(angles: [f64; 3], translation: Vector3, center: Point3) -> Self {
        Self { angles, translation, center }
    }

    /// Create an identity rigid transform (no rotation, no translation).
    pub fn identity() -> Self {
        Self::new([0.0; 3], Vector3::zeros(), Point3::origin())
    }

    /// Get the Euler angles `[ax, ay, az]` in radians.
    pub fn angles(&self) -> [f64; 3] {
        self.angles
    }

    /// Get the translation vector.
    pub fn translation(&self) -> Vector3 {
        self.translation
    }

    /// Get the center of rotation.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Get the rotation as a nalgebra rotation matrix.
    pub fn rotation(&self) -> Rotation3<f64> {
        // from_euler_angles(r, p, y) builds Rz(y) * Ry(p) * Rx(r),
        // the same ZYX composition used here.
        Rotation3::from_euler_angles(self.angles[0], self.angles[1], self.angles[2])
    }

    /// Parameter vector `[ax, ay, az, tx, ty, tz]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![
            self.angles[0],
            self.angles[1],
            self.angles[2],
            self.translation[0],
            self.translation[1],
            self.translation[2],
        ]
    }

    /// Build a transform from `[ax, ay, az, tx, ty, tz]` with the given fixed center.
    pub fn from_parameters(params: &[f64], center: Point3) -> Result<Self, TransformError> {
        if params.len() != 6 {
            return Err(TransformError::ParameterLength {
                expected: 6,
                actual: params.len(),
            });
        }
        Ok(Self::new(
            [params[0], params[1], params[2]],
            Vector3::new([params[3], params[4], params[5]]),
            center,
        ))
    }
}

impl Transform<3> for Euler3DTransform {
    fn transform_point(&self, point: &Point3) -> Point3 {
        let rotation = self.rotation();
        let centered = point.0 - self.center.0;
        Point(self.center.0 + rotation * centered + self.translation.0)
    }

    fn inverse(&self) -> Option<Box<dyn Transform<3>>> {
        // y = R(x - c) + c + t  =>  x = R^-1(y - c) + c - R^-1 t
        let inverse_rotation = self.rotation().inverse();
        let (ax, ay, az) = inverse_rotation.euler_angles();
        let inv_translation = -(inverse_rotation * self.translation.0);
        Some(Box::new(Self::new(
            [ax, ay, az],
            Vector(inv_translation),
            self.center,
        )))
    }
}
