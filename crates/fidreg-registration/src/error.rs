//! Error types for registration operations.
//!
//! This module provides structured error types for paired-point registration
//! workflows, enabling better error handling and debugging.

use thiserror::Error;

/// Main error type for registration operations.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Two corresponding point sequences differ in length.
    ///
    /// Inputs are never silently truncated or padded.
    #[error("point set length mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Fewer points than the operation's minimum.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    /// Point configuration does not determine a solution
    /// (coincident/collinear points, singular least-squares system).
    #[error("degenerate configuration: {0}")]
    DegenerateConfiguration(String),

    /// Sphere fit recovered a non-positive squared radius.
    ///
    /// Happens in the presence of outliers; surfaced instead of being
    /// masked as zero or NaN.
    #[error("sphere fit produced non-physical radius (r^2 = {radius_squared})")]
    NonPhysicalRadius { radius_squared: f64 },

    /// Numerical instability detected (non-finite inputs or results).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Every candidate of a multi-start batch failed.
    #[error("exploration failed: all {attempted} candidates were rejected")]
    ExplorationFailed { attempted: usize },
}

/// Result type for registration operations.
pub type Result<T> = std::result::Result<T, RegistrationError>;

impl RegistrationError {
    /// Create a degenerate configuration error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateConfiguration(msg.into())
    }

    /// Create a numerical instability error.
    pub fn numerical_instability(msg: impl Into<String>) -> Self {
        Self::NumericalInstability(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
