//! Fiducial Registration Example
//!
//! This example demonstrates the complete paired-point registration workflow
//! on synthetic data:
//!
//! 1. Localize spherical fiducials from surface samples (sphere fit)
//! 2. Estimate a rigid 3D transform from the recovered centers
//! 3. Assess registration quality (FRE at fiducials, TRE at targets)
//! 4. Recover a large 2D rotation with the multi-start initializer
//!
//! Usage:
//!   cargo run --example fiducial_registration

use fidreg_core::spatial::{Point2, Point3, Vector2, Vector3};
use fidreg_core::transform::{Euler2DTransform, Transform, VersorRigid3DTransform};
use fidreg_registration::errors::registration_errors;
use fidreg_registration::landmark::estimate_rigid_3d;
use fidreg_registration::localization::fit_sphere_least_squares;
use fidreg_registration::multistart::{explore_then_refine, parameter_grid, Refined};
use nalgebra::UnitQuaternion;
use std::f64::consts::{FRAC_PI_2, PI};

/// Surface samples of a spherical fiducial at the given center.
fn sphere_surface(center: Point3, radius: f64, count: usize) -> Vec<Point3> {
    (0..count)
        .map(|i| {
            let theta = 0.4 + 0.6 * i as f64;
            let phi = 0.9 + 0.8 * i as f64;
            center
                + Vector3::new([
                    radius * theta.sin() * phi.cos(),
                    radius * theta.sin() * phi.sin(),
                    radius * theta.cos(),
                ])
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    println!("Fiducial Registration Example");
    println!("=============================\n");

    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    // =======================================================================
    // Step 1: Localize spherical fiducials
    // =======================================================================
    println!("Step 1: Localizing spherical fiducials...");

    let radius = 6.0;
    let true_centers = [
        Point3::new([0.0, 0.0, 0.0]),
        Point3::new([80.0, 0.0, 0.0]),
        Point3::new([0.0, 80.0, 0.0]),
        Point3::new([0.0, 0.0, 80.0]),
    ];

    // The ground-truth motion between the two spaces.
    let truth = VersorRigid3DTransform::new(
        UnitQuaternion::from_euler_angles(0.1, -0.3, 0.7),
        Vector3::new([12.0, -5.0, 20.0]),
        Point3::origin(),
    );

    let fixed_fiducials: Vec<Point3> = true_centers
        .iter()
        .map(|&c| {
            let samples = sphere_surface(c, radius, 12);
            let fit = fit_sphere_least_squares(&samples)?;
            println!(
                "  fixed fiducial at ({:7.3}, {:7.3}, {:7.3}), radius {:.3}",
                fit.center[0], fit.center[1], fit.center[2], fit.radius
            );
            Ok(fit.center)
        })
        .collect::<anyhow::Result<_>>()?;

    let moving_fiducials: Vec<Point3> = true_centers
        .iter()
        .map(|&c| {
            let samples = sphere_surface(truth.transform_point(&c), radius, 12);
            Ok(fit_sphere_least_squares(&samples)?.center)
        })
        .collect::<anyhow::Result<_>>()?;

    // =======================================================================
    // Step 2: Estimate the rigid transform
    // =======================================================================
    println!("\nStep 2: Estimating rigid 3D transform from fiducial pairs...");

    let estimated = estimate_rigid_3d(&fixed_fiducials, &moving_fiducials)?;
    println!(
        "  rotation angle: {:.4} rad (truth {:.4} rad)",
        estimated.versor().angle(),
        truth.versor().angle()
    );

    // =======================================================================
    // Step 3: Assess registration quality
    // =======================================================================
    println!("\nStep 3: Assessing registration quality...");

    let fre = registration_errors(&estimated, &fixed_fiducials, &moving_fiducials)?;
    println!("  FRE: {}", fre);

    // Targets are held out of the estimation; their residual against the
    // ground truth is the error a clinician actually cares about.
    let targets = [Point3::new([40.0, 40.0, 40.0]), Point3::new([20.0, 60.0, 10.0])];
    let true_moving_targets: Vec<Point3> =
        targets.iter().map(|t| truth.transform_point(t)).collect();
    let tre = registration_errors(&estimated, &targets, &true_moving_targets)?;
    println!("  TRE: {}", tre);

    // =======================================================================
    // Step 4: Multi-start initialization for a large 2D rotation
    // =======================================================================
    println!("\nStep 4: Multi-start recovery of a 160 degree 2D rotation...");

    let fixed = [
        Point2::new([10.0, 0.0]),
        Point2::new([0.0, 10.0]),
        Point2::new([-10.0, 0.0]),
        Point2::new([0.0, -12.0]),
        Point2::new([7.0, 7.0]),
    ];
    let true_angle = 160.0_f64.to_radians();
    let motion = Euler2DTransform::new(true_angle, Vector2::new([3.0, -2.0]), Point2::origin());
    let moving = motion.transform_points(&fixed);

    let cost = |params: &[f64]| {
        let candidate = align_at_angle(params[0], &fixed, &moving);
        registration_errors(&candidate, &fixed, &moving).map(|e| e.mean)
    };

    // One metric evaluation per coarse angle candidate, then a local sweep
    // from the most promising one.
    let grid = parameter_grid(&[vec![0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2]]);
    let result = explore_then_refine(
        &grid,
        cost,
        |params| {
            let mut best_angle = params[0];
            let mut best_value = cost(params)?;
            let mut width = FRAC_PI_2;
            for _ in 0..24 {
                for step in [-1.0, 1.0] {
                    let angle = best_angle + step * width * 0.5;
                    let value = cost(&[angle])?;
                    if value < best_value {
                        best_value = value;
                        best_angle = angle;
                    }
                }
                width *= 0.5;
            }
            Ok(Refined::new(best_angle, best_value))
        },
        1,
    )?;

    println!(
        "  started from angle {:.4} rad, refined to {:.4} rad (truth {:.4} rad)",
        result.initial_parameters[0],
        result.best.value.rem_euclid(2.0 * PI),
        true_angle
    );
    println!("  final mean residual: {:.6}", result.best.metric_value);

    println!("\nDone.");
    Ok(())
}

/// Rigid 2D alignment at a fixed angle: rotate about the fixed centroid and
/// translate the rotated centroid onto the moving centroid.
fn align_at_angle(angle: f64, fixed: &[Point2], moving: &[Point2]) -> Euler2DTransform {
    let fixed_centroid = Point2::centroid(fixed).unwrap();
    let moving_centroid = Point2::centroid(moving).unwrap();
    Euler2DTransform::new(angle, moving_centroid - fixed_centroid, fixed_centroid)
}
