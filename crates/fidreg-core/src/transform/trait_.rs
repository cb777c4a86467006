//! Transform trait for spatial coordinate transformations.
//!
//! This module defines the core Transform trait that all spatial transforms must implement.

use crate::spatial::Point;

/// Transform trait for spatial coordinate transformations.
///
/// Maps points from one physical space to another, conventionally from the
/// fixed (reference) space into the moving space. All transforms must
/// implement this trait to be used in registration and error assessment.
///
/// # Type Parameters
/// * `D` - The spatial dimensionality (2 or 3)
pub trait Transform<const D: usize> {
    /// Apply the transform to a single point.
    fn transform_point(&self, point: &Point<D>) -> Point<D>;

    /// Apply the transform to a batch of points.
    fn transform_points(&self, points: &[Point<D>]) -> Vec<Point<D>> {
        points.iter().map(|p| self.transform_point(p)).collect()
    }

    /// Get the inverse transform (if available).
    ///
    /// Not all transforms are easily invertible, so this returns an Option.
    fn inverse(&self) -> Option<Box<dyn Transform<D>>> {
        None
    }
}

impl<T, const D: usize> Transform<D> for &T
where
    T: Transform<D> + ?Sized,
{
    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        (**self).transform_point(point)
    }

    fn inverse(&self) -> Option<Box<dyn Transform<D>>> {
        (**self).inverse()
    }
}

impl<T, const D: usize> Transform<D> for Box<T>
where
    T: Transform<D> + ?Sized,
{
    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        (**self).transform_point(point)
    }

    fn inverse(&self) -> Option<Box<dyn Transform<D>>> {
        (**self).inverse()
    }
}

/// The identity transform, useful as a baseline in error assessment.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransform;

impl<const D: usize> Transform<D> for IdentityTransform {
    fn transform_point(&self, point: &Point<D>) -> Point<D> {
        *point
    }

    fn inverse(&self) -> Option<Box<dyn Transform<D>>> {
        Some(Box::new(IdentityTransform))
    }
}
