//! Registration error assessment for paired point sets.
//!
//! Given an estimated transform and two corresponding point sets, computes
//! the per-point residual distances and their summary statistics. Whether
//! the result is a Fiducial Registration Error (points used for estimation)
//! or a Target Registration Error (held-out points) is purely a function of
//! which points the caller passes in; the computation itself is role-agnostic.

use serde::{Deserialize, Serialize};

use fidreg_core::spatial::Point;
use fidreg_core::transform::Transform;

use crate::error::Result;
use crate::validation::{validate_finite_points, validate_matched_lengths, validate_min_points};

/// Residual distances between predicted and observed point positions,
/// with their summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationErrors {
    /// Mean residual distance.
    pub mean: f64,
    /// Population standard deviation of the residual distances.
    pub std: f64,
    /// Smallest residual distance.
    pub min: f64,
    /// Largest residual distance.
    pub max: f64,
    /// Per-point residual distances, in input order.
    pub distances: Vec<f64>,
}

impl RegistrationErrors {
    /// Number of point pairs the statistics were computed over.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// True if no distances were recorded.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

impl std::fmt::Display for RegistrationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "errors over {} points: mean {:.4} +/- {:.4}, range [{:.4}, {:.4}]",
            self.distances.len(),
            self.mean,
            self.std,
            self.min,
            self.max
        )
    }
}

/// Compute per-point registration errors and their summary statistics.
///
/// For each pair, the residual is the Euclidean distance between
/// `transform(fixed_i)` and `moving_i`. Fails with `DimensionMismatch`
/// when the two sequences differ in length; inputs are never truncated
/// or padded.
pub fn registration_errors<T, const D: usize>(
    transform: &T,
    fixed: &[Point<D>],
    moving: &[Point<D>],
) -> Result<RegistrationErrors>
where
    T: Transform<D> + ?Sized,
{
    validate_matched_lengths(fixed, moving)?;
    validate_min_points(fixed, 1)?;
    validate_finite_points(fixed, "fixed")?;
    validate_finite_points(moving, "moving")?;

    let distances: Vec<f64> = fixed
        .iter()
        .zip(moving)
        .map(|(f, m)| transform.transform_point(f).distance_to(m))
        .collect();

    let n = distances.len() as f64;
    let mean = distances.iter().sum::<f64>() / n;
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = distances.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Ok(RegistrationErrors {
        mean,
        std: variance.sqrt(),
        min,
        max,
        distances,
    })
}
