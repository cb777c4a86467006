//! Transform types and operations.
//!
//! This module provides transform traits and implementations
//! for spatial coordinate transformations.

pub mod trait_;
pub mod translation;
pub mod euler2d;
pub mod euler3d;
pub mod versor;
pub mod affine;
pub mod chained;

mod error;

pub use trait_::{IdentityTransform, Transform};
pub use translation::TranslationTransform;
pub use euler2d::Euler2DTransform;
pub use euler3d::Euler3DTransform;
pub use versor::VersorRigid3DTransform;
pub use affine::AffineTransform;
pub use chained::ChainedTransform;
pub use error::TransformError;
