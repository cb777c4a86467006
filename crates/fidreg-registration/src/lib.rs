pub mod error;
pub mod errors;
pub mod landmark;
pub mod localization;
pub mod multistart;
pub mod validation;

pub use error::{RegistrationError, Result};
pub use errors::{registration_errors, RegistrationErrors};
pub use landmark::{estimate_affine, estimate_rigid_2d, estimate_rigid_3d};
pub use localization::{fit_sphere_least_squares, SphereFit};
pub use multistart::{
    explore_then_refine, parameter_grid, CandidateFailure, Exploration, MultiStart,
    MultiStartConfig, MultiStartResult, Refined, ScoredCandidate,
};
