use fidreg_core::spatial::{Point2, Point3, Vector2, Vector3};
use fidreg_core::transform::{Euler2DTransform, Transform, VersorRigid3DTransform};
use fidreg_registration::errors::registration_errors;
use fidreg_registration::landmark::{estimate_rigid_2d, estimate_rigid_3d};
use fidreg_registration::localization::fit_sphere_least_squares;
use nalgebra::UnitQuaternion;
use proptest::prelude::*;

/// Well-spread 2D base points; per-point jitter below 0.5 cannot make
/// them coincident.
fn jittered_points_2d(jitter: [f64; 8]) -> Vec<Point2> {
    let base = [
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 10.0],
        [0.0, 10.0],
    ];
    base.iter()
        .enumerate()
        .map(|(i, b)| Point2::new([b[0] + jitter[2 * i], b[1] + jitter[2 * i + 1]]))
        .collect()
}

/// Tetrahedral 3D base points; per-point jitter below 0.5 cannot make
/// them collinear.
fn jittered_points_3d(jitter: [f64; 12]) -> Vec<Point3> {
    let base = [
        [0.0, 0.0, 0.0],
        [10.0, 0.0, 0.0],
        [0.0, 10.0, 0.0],
        [0.0, 0.0, 10.0],
    ];
    base.iter()
        .enumerate()
        .map(|(i, b)| {
            Point3::new([
                b[0] + jitter[3 * i],
                b[1] + jitter[3 * i + 1],
                b[2] + jitter[3 * i + 2],
            ])
        })
        .collect()
}

proptest! {
    #[test]
    fn test_rigid_2d_estimation_roundtrip(
        angle in -3.1f64..3.1,
        tx in -50.0f64..50.0, ty in -50.0f64..50.0,
        jitter in prop::array::uniform8(-0.4f64..0.4)
    ) {
        let fixed = jittered_points_2d(jitter);
        let truth = Euler2DTransform::new(angle, Vector2::new([tx, ty]), Point2::origin());
        let moving = truth.transform_points(&fixed);

        let estimated = estimate_rigid_2d(&fixed, &moving).unwrap();
        let errors = registration_errors(&estimated, &fixed, &moving).unwrap();

        prop_assert!(errors.max < 1e-8, "residuals should vanish: {}", errors);
    }

    #[test]
    fn test_rigid_3d_estimation_roundtrip(
        ax in -3.0f64..3.0, ay in -1.4f64..1.4, az in -3.0f64..3.0,
        tx in -50.0f64..50.0, ty in -50.0f64..50.0, tz in -50.0f64..50.0,
        jitter in prop::array::uniform12(-0.4f64..0.4)
    ) {
        let fixed = jittered_points_3d(jitter);
        let versor = UnitQuaternion::from_euler_angles(ax, ay, az);
        let truth = VersorRigid3DTransform::new(
            versor,
            Vector3::new([tx, ty, tz]),
            Point3::origin(),
        );
        let moving = truth.transform_points(&fixed);

        let estimated = estimate_rigid_3d(&fixed, &moving).unwrap();
        let errors = registration_errors(&estimated, &fixed, &moving).unwrap();

        prop_assert!(errors.max < 1e-8, "residuals should vanish: {}", errors);
    }

    #[test]
    fn test_error_statistics_match_applied_bias(
        bx in -10.0f64..10.0, by in -10.0f64..10.0,
        jitter in prop::array::uniform8(-0.4f64..0.4)
    ) {
        // Shifting every moving point by the same vector makes every
        // residual of the identity transform exactly the bias norm.
        let fixed = jittered_points_2d(jitter);
        let bias = Vector2::new([bx, by]);
        let moving: Vec<Point2> = fixed.iter().map(|p| *p + bias).collect();

        let errors = registration_errors(
            &fidreg_core::transform::IdentityTransform,
            &fixed,
            &moving,
        ).unwrap();

        prop_assert!((errors.mean - bias.norm()).abs() < 1e-10);
        prop_assert!(errors.std < 1e-10, "identical residuals have zero spread: {}", errors);
        prop_assert!((errors.min - errors.max).abs() < 1e-10);
    }

    #[test]
    fn test_sphere_fit_roundtrip(
        cx in -20.0f64..20.0, cy in -20.0f64..20.0, cz in -20.0f64..20.0,
        radius in 1.0f64..10.0
    ) {
        let points: Vec<Point3> = (0..8)
            .map(|i| {
                let theta = 0.5 + 0.7 * i as f64;
                let phi = 0.3 + 1.1 * i as f64;
                Point3::new([
                    cx + radius * theta.sin() * phi.cos(),
                    cy + radius * theta.sin() * phi.sin(),
                    cz + radius * theta.cos(),
                ])
            })
            .collect();

        let fit = fit_sphere_least_squares(&points).unwrap();

        prop_assert!((fit.radius - radius).abs() < 1e-7, "radius: {} vs {}", fit.radius, radius);
        prop_assert!(fit.center.distance_to(&Point3::new([cx, cy, cz])) < 1e-7);
    }
}
