//! Validation utilities for registration operations.
//!
//! This module provides validation functions for ensuring input validity
//! and numerical stability in paired-point registration workflows.

use fidreg_core::spatial::Point;

use crate::error::{RegistrationError, Result};

/// Validate that two corresponding point sequences have equal length.
pub fn validate_matched_lengths<const D: usize>(
    fixed: &[Point<D>],
    moving: &[Point<D>],
) -> Result<()> {
    if fixed.len() != moving.len() {
        return Err(RegistrationError::DimensionMismatch {
            expected: fixed.len(),
            actual: moving.len(),
        });
    }

    Ok(())
}

/// Validate that a point set has at least `required` points.
pub fn validate_min_points<const D: usize>(points: &[Point<D>], required: usize) -> Result<()> {
    if points.len() < required {
        return Err(RegistrationError::InsufficientPoints {
            required,
            actual: points.len(),
        });
    }

    Ok(())
}

/// Validate that every coordinate of every point is finite.
pub fn validate_finite_points<const D: usize>(points: &[Point<D>], label: &str) -> Result<()> {
    for (i, point) in points.iter().enumerate() {
        if !point.is_finite() {
            return Err(RegistrationError::numerical_instability(format!(
                "{} point {} has a non-finite coordinate: {:?}",
                label, i, point
            )));
        }
    }

    Ok(())
}
