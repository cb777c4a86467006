//! Translation transform implementation.
//!
//! This module provides a simple translation transform.

use crate::spatial::{Point, Vector};
use super::error::TransformError;
use super::trait_::Transform;

/// Simple Translation Transform.
///
/// Translates points by a fixed offset vector.
#[derive(Debug, Clone)]
pub struct TranslationTransform<const D: usize> {
    offset: Vector<D>,
}

impl<const D: usize> TranslationTransform<D> {
    /// Create a new translation transform.
    pub fn new(offset: Vector<D>) -> Self {
        Self { offset }
    }

    /// Create an identity translation (zero offset).
    pub fn identity() -> Self {
        Self::new(Vector::zeros())
    }

    /// Get the translation offset.
    pub fn offset(&self) -> Vector<D> {
        self.offset
    }

    /// Parameter vector: the offset components.
    pub fn parameters(&self) -> Vec<f64> {
        self.offset.to_vec()
    }

    /// Build a translation from a parameter vector of length D.
    pub fn from_parameters(params: &[f64]) -> Result<Self, TransformError> {
        if params.len() != D {
            return Err(TransformError::ParameterLength {
                expected: D,
                actual: params.len(),
            });
        }
        Ok(Self::new(Vector::from_slice(params)))
    }
}

impl<const D: usize> Transform<D> for TranslationTransform<D> {
    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        *point + self.offset
    }

    fn inverse(&self) -> Option<Box<dyn Transform<D>>> {
        Some(Box::new(Self::new(-self.offset)))
    }
}
