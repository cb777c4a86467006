pub mod spatial;
pub mod transform;

pub use spatial::{Point, Point2, Point3, Vector, Vector2, Vector3};
pub use transform::{
    AffineTransform, ChainedTransform, Euler2DTransform, Euler3DTransform, IdentityTransform,
    Transform, TransformError, TranslationTransform, VersorRigid3DTransform,
};
