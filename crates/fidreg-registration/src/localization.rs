//! Least-squares sphere fitting for spherical-fiducial localization.
//!
//! Estimates a sphere's center and radius from points believed to lie near
//! its surface by minimizing the sum of squared algebraic distances. The
//! algebraic formulation trades geometric accuracy for a single linear
//! solve; no iterative refinement or outlier rejection is performed, so a
//! gross outlier degrades the fit and can push the recovered squared radius
//! non-positive.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fidreg_core::spatial::Point3;

use crate::error::{RegistrationError, Result};
use crate::validation::{validate_finite_points, validate_min_points};

/// Result of a least-squares sphere fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereFit {
    /// Estimated sphere center.
    pub center: Point3,
    /// Estimated sphere radius.
    pub radius: f64,
}

/// Fit a sphere to m >= 4 points in 3D by algebraic least squares.
///
/// Each point contributes the row `[-2x, -2y, -2z, 1]` with right-hand side
/// `-(x^2 + y^2 + z^2)`; solving for `[cx, cy, cz, k]` gives the center
/// directly, and the radius as `r = sqrt(||c||^2 - k)`.
///
/// Fails with `NonPhysicalRadius` when the recovered squared radius is not
/// positive, which can happen with outliers, and with
/// `DegenerateConfiguration` when the points do not determine a sphere
/// (coplanar or otherwise rank-deficient configurations).
pub fn fit_sphere_least_squares(points: &[Point3]) -> Result<SphereFit> {
    validate_min_points(points, 4)?;
    validate_finite_points(points, "sphere")?;

    let n = points.len();
    let mut design = DMatrix::<f64>::zeros(n, 4);
    let mut rhs = DVector::<f64>::zeros(n);
    for (i, p) in points.iter().enumerate() {
        design[(i, 0)] = -2.0 * p[0];
        design[(i, 1)] = -2.0 * p[1];
        design[(i, 2)] = -2.0 * p[2];
        design[(i, 3)] = 1.0;
        rhs[i] = -(p[0] * p[0] + p[1] * p[1] + p[2] * p[2]);
    }

    let svd = design.svd(true, true);
    let max_sv = svd.singular_values.max();
    let rank = svd
        .singular_values
        .iter()
        .filter(|&&sv| sv > 1e-9 * max_sv.max(1.0))
        .count();
    if rank < 4 {
        return Err(RegistrationError::degenerate(format!(
            "sphere system is rank {} (need 4): points do not determine a sphere",
            rank
        )));
    }

    let solution = svd.solve(&rhs, 1e-12).map_err(RegistrationError::degenerate)?;

    let center = Point3::new([solution[0], solution[1], solution[2]]);
    let k = solution[3];
    let radius_squared = solution[0] * solution[0]
        + solution[1] * solution[1]
        + solution[2] * solution[2]
        - k;

    // An exact least-squares solution satisfies r^2 = mean ||p - c||^2 >= 0,
    // so this only triggers when the truncated-SVD solve is ill-conditioned.
    if radius_squared <= 0.0 {
        return Err(RegistrationError::NonPhysicalRadius { radius_squared });
    }

    let radius = radius_squared.sqrt();
    debug!(
        "sphere fit over {} points: center=({:.4}, {:.4}, {:.4}), radius={:.4}",
        n, center[0], center[1], center[2], radius
    );

    Ok(SphereFit { center, radius })
}
