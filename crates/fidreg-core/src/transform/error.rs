use thiserror::Error;

/// Errors raised when constructing transforms from raw parameter vectors.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Parameter vector has the wrong number of entries.
    #[error("parameter vector length mismatch: expected {expected}, got {actual}")]
    ParameterLength { expected: usize, actual: usize },

    /// Versor vector part does not describe a unit quaternion.
    #[error("versor vector part has norm {norm} > 1")]
    InvalidVersor { norm: f64 },
}
