//! Rigid 2D transform parametrized by a single rotation angle.

use nalgebra::Rotation2;

use crate::spatial::{Point, Point2, Vector, Vector2};
use super::error::TransformError;
use super::trait_::Transform;

/// Rigid 2D Transform (rotation + translation).
///
/// Includes a fixed center of rotation: T(x) = R(x - c) + c + t
///
/// The parameter vector follows the ITK ordering `[angle, tx, ty]`;
/// the center is a fixed parameter and is not part of the vector.
#[derive(Debug, Clone)]
pub struct Euler2DTransform {
    angle: f64,
    translation: Vector2,
    center: Point2,
}

impl Euler2DTransform {
    /// Create a new rigid 2D transform.
    ///
    /// # Arguments
    /// * `angle` - Counterclockwise rotation angle in radians
    /// * `translation` - Translation vector
    /// * `center` - Fixed center of rotation
    pub fn new(angle: f64, translation: Vector2, center: Point2) -> Self {
        Self { angle, translation, center }
    }

    /// Create an identity rigid transform (no rotation, no translation).
    pub fn identity() -> Self {
        Self::new(0.0, Vector2::zeros(), Point2::origin())
    }

    /// Get the rotation angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Get the translation vector.
    pub fn translation(&self) -> Vector2 {
        self.translation
    }

    /// Get the center of rotation.
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Parameter vector `[angle, tx, ty]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![self.angle, self.translation[0], self.translation[1]]
    }

    /// Build a transform from `[angle, tx, ty]` with the given fixed center.
    pub fn from_parameters(params: &[f64], center: Point2) -> Result<Self, TransformError> {
        if params.len() != 3 {
            return Err(TransformError::ParameterLength {
                expected: 3,
                actual: params.len(),
            });
        }
        Ok(Self::new(params[0], Vector2::new([params[1], params[2]]), center))
    }
}

impl Transform<2> for Euler2DTransform {
    fn transform_point(&self, point: &Point2) -> Point2 {
        let rotation = Rotation2::new(self.angle);
        let centered = point.0 - self.center.0;
        Point(self.center.0 + rotation * centered + self.translation.0)
    }

    fn inverse(&self) -> Option<Box<dyn Transform<2>>> {
        // y = R(x - c) + c + t  =>  x = R^-1(y - c - t) + c
        let rotation = Rotation2::new(self.angle);
        let inv_translation = -(rotation.inverse() * self.translation.0);
        Some(Box::new(Self::new(
            -self.angle,
            Vector(inv_translation),
            self.center,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translation_only() {
        let transform = Euler2DTransform::new(
            0.0,
            Vector2::new([1.0, 2.0]),
            Point2::origin(),
        );

        let p = transform.transform_point(&Point2::new([1.0, 1.0]));
        assert_eq!(p, Point2::new([2.0, 3.0]));
    }

    #[test]
    fn test_quarter_turn() {
        let transform = Euler2DTransform::new(
            FRAC_PI_2,
            Vector2::zeros(),
            Point2::origin(),
        );

        // Point (1, 0) should rotate to (0, 1)
        let p = transform.transform_point(&Point2::new([1.0, 0.0]));
        assert!((p[0] - 0.0).abs() < 1e-12, "X mismatch: got {}", p[0]);
        assert!((p[1] - 1.0).abs() < 1e-12, "Y mismatch: got {}", p[1]);
    }

    #[test]
    fn test_rotation_about_center() {
        // Rotating about the point itself leaves it fixed.
        let center = Point2::new([3.0, -1.0]);
        let transform = Euler2DTransform::new(1.2, Vector2::zeros(), center);

        let p = transform.transform_point(&center);
        assert!((p[0] - center[0]).abs() < 1e-12);
        assert!((p[1] - center[1]).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let transform = Euler2DTransform::new(
            0.7,
            Vector2::new([2.0, -3.0]),
            Point2::new([1.0, 1.0]),
        );
        let inverse = transform.inverse().unwrap();

        let p = Point2::new([5.0, 4.0]);
        let roundtrip = inverse.transform_point(&transform.transform_point(&p));
        assert!((roundtrip[0] - p[0]).abs() < 1e-10);
        assert!((roundtrip[1] - p[1]).abs() < 1e-10);
    }

    #[test]
    fn test_parameter_roundtrip() {
        let center = Point2::new([0.5, 0.5]);
        let transform = Euler2DTransform::from_parameters(&[0.3, 1.0, -1.0], center).unwrap();
        assert_eq!(transform.parameters(), vec![0.3, 1.0, -1.0]);

        let err = Euler2DTransform::from_parameters(&[0.3], center).unwrap_err();
        assert!(matches!(err, TransformError::ParameterLength { expected: 3, actual: 1 }));
    }
}
