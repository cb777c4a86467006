//! Point type for representing spatial coordinates.
//!
//! Points are positions in physical space: fiducial locations, target
//! locations, and everything a transform maps.

use nalgebra::{Point as NaPoint, SVector};
use serde::{Deserialize, Serialize};

use super::Vector;

/// A point in D-dimensional physical space.
///
/// A thin wrapper around nalgebra's `Point` that pins the scalar type to
/// `f64` and carries the operations paired-point registration needs:
/// distances, centroids, and finiteness checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<const D: usize>(pub NaPoint<f64, D>);

impl<const D: usize> Point<D> {
    /// Create a new point from coordinates.
    pub fn new(coords: [f64; D]) -> Self {
        Self(NaPoint::from(coords))
    }

    /// Create a point at the origin (all coordinates zero).
    pub fn origin() -> Self {
        Self(NaPoint::origin())
    }

    /// Create a new point from a slice of coordinates.
    ///
    /// Panics when the slice length does not match the dimension.
    pub fn from_slice(coords: &[f64]) -> Self {
        assert!(coords.len() == D, "coordinate slice length must match dimension");
        Self(NaPoint::from(SVector::from_column_slice(coords)))
    }

    /// Arithmetic mean of a non-empty point set.
    pub fn centroid(points: &[Self]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut sum = SVector::<f64, D>::zeros();
        for p in points {
            sum += p.0.coords;
        }
        Some(Self(NaPoint::from(sum / points.len() as f64)))
    }

    /// Convert point to a vector of coordinates.
    pub fn to_vec(&self) -> Vec<f64> {
        self.0.coords.iter().copied().collect()
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.0 - other.0).norm()
    }

    /// True if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.0.coords.iter().all(|c| c.is_finite())
    }

    /// Get the inner nalgebra point.
    pub fn inner(&self) -> &NaPoint<f64, D> {
        &self.0
    }

    /// Get mutable reference to inner nalgebra point.
    pub fn inner_mut(&mut self) -> &mut NaPoint<f64, D> {
        &mut self.0
    }
}

impl<const D: usize> std::ops::Index<usize> for Point<D> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0.coords[index]
    }
}

impl<const D: usize> std::ops::IndexMut<usize> for Point<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0.coords[index]
    }
}

impl<const D: usize> std::ops::Sub for Point<D> {
    type Output = Vector<D>;

    fn sub(self, other: Self) -> Self::Output {
        Vector(self.0.coords - other.0.coords)
    }
}

impl<const D: usize> std::ops::Add<Vector<D>> for Point<D> {
    type Output = Self;

    fn add(self, vector: Vector<D>) -> Self::Output {
        Self(self.0 + vector.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Point3 = Point<3>;
    type Vector3 = Vector<3>;

    #[test]
    fn test_construction_and_indexing() {
        let p = Point3::new([1.5, -2.0, 3.0]);
        assert_eq!(p[0], 1.5);
        assert_eq!(p[2], 3.0);
        assert_eq!(p.to_vec(), vec![1.5, -2.0, 3.0]);

        assert_eq!(Point3::from_slice(&[1.5, -2.0, 3.0]), p);
        assert_eq!(Point3::origin().to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_point_vector_arithmetic() {
        let a = Point3::new([5.0, 5.0, 5.0]);
        let b = Point3::new([2.0, 3.0, 4.0]);
        assert_eq!(a - b, Vector3::new([3.0, 2.0, 1.0]));
        assert_eq!(b + Vector3::new([1.0, 1.0, 1.0]), Point3::new([3.0, 4.0, 5.0]));
    }

    #[test]
    fn test_distance() {
        let a = Point3::new([0.0, 0.0, 0.0]);
        let b = Point3::new([3.0, 4.0, 0.0]);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid() {
        let points = [
            Point3::new([0.0, 0.0, 0.0]),
            Point3::new([2.0, 4.0, 6.0]),
        ];
        let c = Point3::centroid(&points).unwrap();
        assert_eq!(c, Point3::new([1.0, 2.0, 3.0]));

        assert!(Point3::centroid(&[]).is_none());
    }

    #[test]
    fn test_is_finite() {
        assert!(Point3::new([1.0, 2.0, 3.0]).is_finite());
        assert!(!Point3::new([1.0, f64::NAN, 3.0]).is_finite());
        assert!(!Point3::new([f64::INFINITY, 0.0, 0.0]).is_finite());
    }
}
