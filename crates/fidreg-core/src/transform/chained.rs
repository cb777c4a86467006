//! Chained transform implementation.
//!
//! This module provides a mechanism to chain two transforms together.
//! T(x) = T2(T1(x))

use crate::spatial::Point;
use super::trait_::Transform;

/// Chained Transform (T2 after T1).
///
/// Applies two transforms in sequence:
/// y = T2(T1(x))
///
/// This allows composing rigid, affine, and translation transforms.
#[derive(Debug, Clone)]
pub struct ChainedTransform<T1, T2> {
    pub first: T1,
    pub second: T2,
}

impl<T1, T2> ChainedTransform<T1, T2> {
    /// Create a new chained transform.
    ///
    /// # Arguments
    /// * `first` - The first transform to apply
    /// * `second` - The second transform to apply
    pub fn new(first: T1, second: T2) -> Self {
        Self { first, second }
    }
}

impl<T1, T2, const D: usize> Transform<D> for ChainedTransform<T1, T2>
where
    T1: Transform<D>,
    T2: Transform<D>,
{
    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        let intermediate = self.first.transform_point(point);
        self.second.transform_point(&intermediate)
    }

    fn inverse(&self) -> Option<Box<dyn Transform<D>>> {
        // (T2 ∘ T1)^-1 = T1^-1 ∘ T2^-1
        let first_inverse = self.first.inverse()?;
        let second_inverse = self.second.inverse()?;
        Some(Box::new(ChainedTransform::new(second_inverse, first_inverse)))
    }
}
