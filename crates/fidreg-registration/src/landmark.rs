//! Paired-point (landmark) transform estimation.
//!
//! Estimates rigid and affine transforms from two index-aligned point sets:
//! point i in the fixed set corresponds to point i in the moving set. The
//! estimated transforms map fixed-space points into moving-space points,
//! the direction consumed by the error estimator.
//!
//! Rigid estimation uses the SVD-based Kabsch closed form; affine estimation
//! is linear least squares on homogeneous coordinates.

use nalgebra::{DMatrix, Rotation3, SMatrix, SVector, UnitQuaternion};
use tracing::debug;

use fidreg_core::spatial::{Point, Point2, Point3, Vector};
use fidreg_core::transform::{AffineTransform, Euler2DTransform, VersorRigid3DTransform};

use crate::error::{RegistrationError, Result};
use crate::validation::{validate_finite_points, validate_matched_lengths, validate_min_points};

/// Relative threshold below which a singular value counts as zero.
const RANK_TOLERANCE: f64 = 1e-9;

/// Estimate a rigid 2D transform (rotation + translation) aligning
/// `fixed` onto `moving`.
///
/// Requires at least 2 non-coincident point pairs. The rotation center of
/// the returned transform is the fixed-set centroid.
pub fn estimate_rigid_2d(fixed: &[Point2], moving: &[Point2]) -> Result<Euler2DTransform> {
    validate_matched_lengths(fixed, moving)?;
    validate_min_points(fixed, 2)?;
    validate_finite_points(fixed, "fixed")?;
    validate_finite_points(moving, "moving")?;

    let (rotation, fixed_centroid, moving_centroid) = kabsch_rotation::<2>(fixed, moving, 1)?;

    let angle = rotation[(1, 0)].atan2(rotation[(0, 0)]);
    let translation = Vector(moving_centroid - fixed_centroid);

    debug!(
        "estimated rigid 2D transform from {} point pairs: angle={:.6} rad",
        fixed.len(),
        angle
    );

    Ok(Euler2DTransform::new(angle, translation, Point(fixed_centroid.into())))
}

/// Estimate a rigid 3D transform (rotation + translation) aligning
/// `fixed` onto `moving`.
///
/// Requires at least 3 non-collinear point pairs. The rotation center of
/// the returned transform is the fixed-set centroid; the rotation is
/// returned as a versor, which is free of gimbal lock.
pub fn estimate_rigid_3d(fixed: &[Point3], moving: &[Point3]) -> Result<VersorRigid3DTransform> {
    validate_matched_lengths(fixed, moving)?;
    validate_min_points(fixed, 3)?;
    validate_finite_points(fixed, "fixed")?;
    validate_finite_points(moving, "moving")?;

    let (rotation, fixed_centroid, moving_centroid) = kabsch_rotation::<3>(fixed, moving, 2)?;

    let versor = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(rotation));
    let translation = Vector(moving_centroid - fixed_centroid);

    debug!(
        "estimated rigid 3D transform from {} point pairs: angle={:.6} rad",
        fixed.len(),
        versor.angle()
    );

    Ok(VersorRigid3DTransform::new(
        versor,
        translation,
        Point(fixed_centroid.into()),
    ))
}

/// Estimate a general affine transform aligning `fixed` onto `moving`.
///
/// Solves the homogeneous linear least-squares system row by row; requires
/// at least D + 1 point pairs in general position.
pub fn estimate_affine<const D: usize>(
    fixed: &[Point<D>],
    moving: &[Point<D>],
) -> Result<AffineTransform<D>> {
    validate_matched_lengths(fixed, moving)?;
    validate_min_points(fixed, D + 1)?;
    validate_finite_points(fixed, "fixed")?;
    validate_finite_points(moving, "moving")?;

    let n = fixed.len();

    // Row i of the design matrix is [f_i^T, 1]; the unknown B stacks A^T
    // over t^T, so that X * B = Y gives m_i = A f_i + t.
    let mut design = DMatrix::<f64>::zeros(n, D + 1);
    let mut rhs = DMatrix::<f64>::zeros(n, D);
    for i in 0..n {
        for j in 0..D {
            design[(i, j)] = fixed[i][j];
            rhs[(i, j)] = moving[i][j];
        }
        design[(i, D)] = 1.0;
    }

    let svd = design.svd(true, true);
    let max_sv = svd.singular_values.max();
    let rank = svd
        .singular_values
        .iter()
        .filter(|&&sv| sv > RANK_TOLERANCE * max_sv.max(1.0))
        .count();
    if rank < D + 1 {
        return Err(RegistrationError::degenerate(format!(
            "affine system is rank {} (need {}): fixed points span a degenerate subspace",
            rank,
            D + 1
        )));
    }

    let solution = svd
        .solve(&rhs, RANK_TOLERANCE)
        .map_err(RegistrationError::degenerate)?;

    let mut matrix = SMatrix::<f64, D, D>::zeros();
    let mut translation = Vector::<D>::zeros();
    for j in 0..D {
        for i in 0..D {
            matrix[(j, i)] = solution[(i, j)];
        }
        translation[j] = solution[(D, j)];
    }

    debug!("estimated affine {}D transform from {} point pairs", D, n);

    Ok(AffineTransform::new(matrix, translation, Point::origin()))
}

/// Kabsch closed form: centroids, cross-covariance, SVD, and the
/// determinant-corrected rotation mapping centered fixed points onto
/// centered moving points.
///
/// `min_rank` is the number of non-zero singular values the covariance must
/// have for the rotation to be determined (1 in 2D, 2 in 3D).
fn kabsch_rotation<const D: usize>(
    fixed: &[Point<D>],
    moving: &[Point<D>],
    min_rank: usize,
) -> Result<(SMatrix<f64, D, D>, SVector<f64, D>, SVector<f64, D>)> {
    let n = fixed.len() as f64;

    let mut fixed_centroid = SVector::<f64, D>::zeros();
    let mut moving_centroid = SVector::<f64, D>::zeros();
    for (f, m) in fixed.iter().zip(moving) {
        fixed_centroid += f.0.coords;
        moving_centroid += m.0.coords;
    }
    fixed_centroid /= n;
    moving_centroid /= n;

    // Cross-covariance H = sum (f_i - fc)(m_i - mc)^T, held in a dynamic
    // matrix so the SVD below works for any D.
    let mut covariance = DMatrix::<f64>::zeros(D, D);
    for (f, m) in fixed.iter().zip(moving) {
        let f_centered = f.0.coords - fixed_centroid;
        let m_centered = m.0.coords - moving_centroid;
        for row in 0..D {
            for col in 0..D {
                covariance[(row, col)] += f_centered[row] * m_centered[col];
            }
        }
    }

    let svd = covariance.svd(true, true);
    let u = svd
        .u
        .ok_or_else(|| RegistrationError::degenerate("SVD did not produce U"))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| RegistrationError::degenerate("SVD did not produce V^T"))?;

    let max_sv = svd.singular_values.max();
    let rank = svd
        .singular_values
        .iter()
        .filter(|&&sv| sv > RANK_TOLERANCE * max_sv.max(1.0))
        .count();
    if rank < min_rank {
        return Err(RegistrationError::degenerate(format!(
            "cross-covariance is rank {} (need {}): points are coincident or collinear",
            rank, min_rank
        )));
    }

    // R = V U^T, with the last column of V negated if the result would be
    // a reflection. Keeps det(R) = +1.
    let mut v = v_t.transpose();
    let mut rotation = &v * u.transpose();
    if rotation.determinant() < 0.0 {
        let mut last_column = v.column_mut(D - 1);
        last_column.neg_mut();
        rotation = &v * u.transpose();
    }

    Ok((
        SMatrix::from_fn(|row, col| rotation[(row, col)]),
        fixed_centroid,
        moving_centroid,
    ))
}
