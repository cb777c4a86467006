//! Explore/exploit strategy against synthetic cost landscapes and a
//! rotation-initialization scenario.

use fidreg_core::spatial::{Point2, Vector2};
use fidreg_core::transform::{Euler2DTransform, Transform};
use fidreg_registration::errors::registration_errors;
use fidreg_registration::multistart::{
    explore_then_refine, parameter_grid, MultiStart, MultiStartConfig, Refined,
};
use std::f64::consts::{FRAC_PI_2, PI};

/// Asymmetric double well: global minimum near x = -1, local minimum near
/// x = +1 with a strictly higher value.
fn double_well(x: f64) -> f64 {
    let q = x * x - 1.0;
    q * q + 0.2 * x
}

fn double_well_gradient(x: f64) -> f64 {
    4.0 * x * (x * x - 1.0) + 0.2
}

/// Plain gradient descent, the caller-supplied "full local registration"
/// stand-in for these tests.
fn descend(start: f64) -> Refined<f64> {
    let mut x = start;
    for _ in 0..5000 {
        x -= 0.01 * double_well_gradient(x);
    }
    Refined::new(x, double_well(x))
}

#[test]
fn test_k1_may_settle_in_local_minimum() {
    // The grid point with the best explored value sits in the basin of the
    // local minimum, so refining only the top candidate misses the global
    // one. Accepted, non-error outcome.
    let candidates = vec![vec![0.8], vec![-3.0]];

    let result = explore_then_refine(
        &candidates,
        |p| Ok(double_well(p[0])),
        |p| Ok(descend(p[0])),
        1,
    )
    .unwrap();

    assert!(result.best.value > 0.0, "should land in the x > 0 basin");
    assert!(
        result.best.metric_value > 0.0,
        "local minimum value {} should stay above the global one",
        result.best.metric_value
    );
}

#[test]
fn test_k_all_is_at_least_as_good_as_any_single_start() {
    let candidates = vec![vec![0.8], vec![-3.0], vec![2.5]];

    let single: Vec<f64> = candidates
        .iter()
        .map(|c| {
            explore_then_refine(
                std::slice::from_ref(c),
                |p| Ok(double_well(p[0])),
                |p| Ok(descend(p[0])),
                1,
            )
            .unwrap()
            .best
            .metric_value
        })
        .collect();

    let all = explore_then_refine(
        &candidates,
        |p| Ok(double_well(p[0])),
        |p| Ok(descend(p[0])),
        candidates.len(),
    )
    .unwrap();

    for value in &single {
        assert!(
            all.best.metric_value <= value + 1e-12,
            "k = all ({}) must not lose to a single start ({})",
            all.best.metric_value,
            value
        );
    }
    assert!(
        all.best.value < 0.0,
        "refining every candidate reaches the global basin"
    );
}

#[test]
fn test_parallel_and_sequential_explore_agree() {
    let candidates: Vec<Vec<f64>> = (0..32).map(|i| vec![i as f64 * 0.25 - 4.0]).collect();
    let evaluate = |p: &[f64]| Ok(double_well(p[0]));

    let parallel = MultiStart::new(MultiStartConfig::new())
        .explore(&candidates, evaluate)
        .unwrap();
    let sequential = MultiStart::new(MultiStartConfig::new().sequential())
        .explore(&candidates, evaluate)
        .unwrap();

    assert_eq!(parallel.ranked.len(), sequential.ranked.len());
    for (a, b) in parallel.ranked.iter().zip(&sequential.ranked) {
        assert_eq!(a.parameters, b.parameters);
        assert_eq!(a.metric_value, b.metric_value);
    }
}

#[test]
fn test_rotation_grid_initialization() {
    // Large-rotation 2D alignment: a single local search started at angle 0
    // cannot cross to a 170 degree rotation, but exploring a coarse angle
    // grid first lands the refinement in the right basin.
    let fixed = [
        Point2::new([10.0, 0.0]),
        Point2::new([0.0, 10.0]),
        Point2::new([-10.0, 0.0]),
        Point2::new([0.0, -12.0]),
        Point2::new([7.0, 7.0]),
    ];
    let true_angle = 170.0_f64.to_radians();
    let truth = Euler2DTransform::new(true_angle, Vector2::new([3.0, -2.0]), Point2::origin());
    let moving = truth.transform_points(&fixed);

    // Mean residual after aligning with a candidate angle; centroids absorb
    // the translation, so the parameter vector is just the angle.
    let cost = |params: &[f64]| {
        let candidate = align_at_angle(params[0], &fixed, &moving);
        registration_errors(&candidate, &fixed, &moving).map(|e| e.mean)
    };

    let grid = parameter_grid(&[vec![0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2]]);
    assert_eq!(grid.len(), 4);

    let result = explore_then_refine(
        &grid,
        cost,
        |params| {
            // Coarse-to-fine angle sweep around the candidate.
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
    )
    .unwrap();

    // The winning candidate is the grid point nearest 170 degrees.
    assert_eq!(result.initial_parameters, vec![PI]);
    assert!(
        result.best.metric_value < 0.05,
        "refined alignment should be tight: {}",
        result.best.metric_value
    );
    let recovered = result.best.value.rem_euclid(2.0 * PI);
    assert!(
        (recovered - true_angle).abs() < 0.01,
        "angle mismatch: {} vs {}",
        recovered,
        true_angle
    );
}

/// Rigid 2D alignment at a fixed angle: rotate about the fixed centroid and
/// translate the rotated centroid onto the moving centroid.
fn align_at_angle(angle: f64, fixed: &[Point2], moving: &[Point2]) -> Euler2DTransform {
    let fixed_centroid = Point2::centroid(fixed).unwrap();
    let moving_centroid = Point2::centroid(moving).unwrap();
    Euler2DTransform::new(angle, moving_centroid - fixed_centroid, fixed_centroid)
}
