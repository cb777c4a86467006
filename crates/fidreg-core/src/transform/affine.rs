//! Affine transform implementation.
//!
//! This module provides an affine transform (linear transformation + translation).

use nalgebra::SMatrix;

use crate::spatial::{Point, Vector};
use super::error::TransformError;
use super::trait_::Transform;

/// Affine Transform (Linear transformation + Translation).
///
/// Represents a general affine transformation with a fixed center:
/// T(x) = A(x - c) + c + t
///
/// where:
/// * A is a D×D matrix (linear transformation: rotation, scale, shear)
/// * t is a D-dimensional translation vector
/// * c is a D-dimensional fixed center of rotation/scaling
///
/// The parameter vector follows the ITK ordering: the D*D matrix entries
/// in row-major order, then the D translation components. The center is a
/// fixed parameter and is not part of the vector.
#[derive(Debug, Clone)]
pub struct AffineTransform<const D: usize> {
    matrix: SMatrix<f64, D, D>,
    translation: Vector<D>,
    center: Point<D>,
}

impl<const D: usize> AffineTransform<D> {
    /// Create a new affine transform.
    ///
    /// # Arguments
    /// * `matrix` - D×D linear transformation matrix
    /// * `translation` - Translation vector
    /// * `center` - Fixed center of rotation/scaling
    pub fn new(matrix: SMatrix<f64, D, D>, translation: Vector<D>, center: Point<D>) -> Self {
        Self { matrix, translation, center }
    }

    /// Create an identity affine transform.
    pub fn identity() -> Self {
        Self::new(SMatrix::identity(), Vector::zeros(), Point::origin())
    }

    /// Get the transformation matrix.
    pub fn matrix(&self) -> &SMatrix<f64, D, D> {
        &self.matrix
    }

    /// Get the translation vector.
    pub fn translation(&self) -> Vector<D> {
        self.translation
    }

    /// Get the center of rotation.
    pub fn center(&self) -> Point<D> {
        self.center
    }

    /// Parameter vector: matrix entries in row-major order, then translation.
    pub fn parameters(&self) -> Vec<f64> {
        let mut params = Vec::with_capacity(D * D + D);
        for row in 0..D {
            for col in 0..D {
                params.push(self.matrix[(row, col)]);
            }
        }
        params.extend_from_slice(&self.translation.to_vec());
        params
    }

    /// Build a transform from a parameter vector of length D*D + D with the
    /// given fixed center.
    pub fn from_parameters(params: &[f64], center: Point<D>) -> Result<Self, TransformError> {
        if params.len() != D * D + D {
            return Err(TransformError::ParameterLength {
                expected: D * D + D,
                actual: params.len(),
            });
        }

        let mut matrix = SMatrix::<f64, D, D>::zeros();
        for row in 0..D {
            for col in 0..D {
                matrix[(row, col)] = params[row * D + col];
            }
        }
        Ok(Self::new(matrix, Vector::from_slice(&params[D * D..]), center))
    }
}

impl<const D: usize> Transform<D> for AffineTransform<D> {
    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        let centered = point.0 - self.center.0;
        Point(self.center.0 + self.matrix * centered + self.translation.0)
    }

    fn inverse(&self) -> Option<Box<dyn Transform<D>>> {
        // y = A(x - c) + c + t  =>  x = A^-1(y - c) + c - A^-1 t
        // Singular matrices have no inverse.
        let inverse_matrix = self.matrix.try_inverse()?;
        let inv_translation = -(inverse_matrix * self.translation.0);
        Some(Box::new(Self::new(
            inverse_matrix,
            Vector(inv_translation),
            self.center,
        )))
    }
}
