//! Spatial types for representing points and displacement vectors.
//!
//! This module provides the fundamental spatial types used throughout fidreg.
//! All types are based on nalgebra for efficient linear algebra operations.

pub mod point;
pub mod vector;

pub use point::Point;
pub use vector::Vector;

// Common type aliases for 2D and 3D
pub type Point2 = Point<2>;
pub type Point3 = Point<3>;
pub type Vector2 = Vector<2>;
pub type Vector3 = Vector<3>;
