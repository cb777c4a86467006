//! Exploration/exploitation multi-start initialization.
//!
//! Robust transform-parameter initialization: sample a similarity metric
//! over a grid of candidate parameter vectors (one evaluation per candidate,
//! no optimization), rank the candidates by metric value, then refine only
//! the most promising ones with full iterative registration supplied by the
//! caller.
//!
//! This is a heuristic that increases, but does not guarantee, convergence
//! to the global optimum; a result corresponding to a local optimum is an
//! accepted, non-error outcome.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{RegistrationError, Result};

/// Configuration for the multi-start strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiStartConfig {
    /// Number of top-ranked candidates to refine (typically 1-3).
    pub keep: usize,
    /// Evaluate candidates in parallel during the explore phase.
    pub parallel: bool,
}

impl Default for MultiStartConfig {
    fn default() -> Self {
        Self {
            keep: 1,
            parallel: true,
        }
    }
}

impl MultiStartConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of candidates to refine.
    pub fn with_keep(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    /// Evaluate candidates sequentially.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// A candidate parameter vector with its metric value.
///
/// Lower metric values mean better alignment, consistent with a similarity
/// cost to minimize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The candidate parameter vector.
    pub parameters: Vec<f64>,
    /// Metric value at these parameters.
    pub metric_value: f64,
}

/// A candidate that was excluded from ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateFailure {
    /// Index of the candidate in the input sequence.
    pub index: usize,
    /// The rejected parameter vector.
    pub parameters: Vec<f64>,
    /// Why the candidate was excluded.
    pub reason: String,
}

/// Accumulated explore-phase results: candidates ranked ascending by metric
/// value, plus the candidates that were excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exploration {
    /// Surviving candidates, sorted ascending by metric value.
    pub ranked: Vec<ScoredCandidate>,
    /// Candidates excluded due to evaluation failure or non-finite metric.
    pub failures: Vec<CandidateFailure>,
}

impl Exploration {
    /// The lowest-cost candidate, if any survived.
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.ranked.first()
    }

    /// The `k` lowest-cost candidates (fewer if fewer survived).
    pub fn top(&self, k: usize) -> &[ScoredCandidate] {
        &self.ranked[..k.min(self.ranked.len())]
    }
}

/// A refined registration result with its final metric value.
#[derive(Debug, Clone)]
pub struct Refined<T> {
    /// The caller's refined result (typically a transform).
    pub value: T,
    /// Final metric value after local refinement.
    pub metric_value: f64,
}

impl<T> Refined<T> {
    /// Create a new refined result.
    pub fn new(value: T, metric_value: f64) -> Self {
        Self { value, metric_value }
    }
}

/// Outcome of a full explore-then-refine run.
#[derive(Debug, Clone)]
pub struct MultiStartResult<T> {
    /// The refined result with the lowest final metric value.
    pub best: Refined<T>,
    /// The candidate parameters the winning refinement started from.
    pub initial_parameters: Vec<f64>,
    /// The explore-phase report.
    pub exploration: Exploration,
    /// Refinements that failed and were excluded.
    pub refine_failures: Vec<CandidateFailure>,
}

/// Multi-start initializer driving the explore and exploit phases.
#[derive(Debug, Clone, Default)]
pub struct MultiStart {
    config: MultiStartConfig,
}

impl MultiStart {
    /// Create a new multi-start initializer.
    pub fn new(config: MultiStartConfig) -> Self {
        Self { config }
    }

    /// Explore phase: evaluate the metric once per candidate and rank the
    /// survivors ascending by metric value.
    ///
    /// Evaluations are independent and run in parallel when configured; each
    /// evaluation owns its context and the inputs are read-only, so there is
    /// no shared mutable state. A failed or non-finite evaluation excludes
    /// that candidate without aborting the batch.
    pub fn explore<E>(&self, candidates: &[Vec<f64>], evaluate: E) -> Result<Exploration>
    where
        E: Fn(&[f64]) -> Result<f64> + Send + Sync,
    {
        if candidates.is_empty() {
            return Err(RegistrationError::invalid_configuration(
                "candidate set is empty",
            ));
        }

        let outcomes: Vec<(usize, Result<f64>)> = if self.config.parallel {
            candidates
                .par_iter()
                .enumerate()
                .map(|(i, params)| (i, evaluate(params)))
                .collect()
        } else {
            candidates
                .iter()
                .enumerate()
                .map(|(i, params)| (i, evaluate(params)))
                .collect()
        };

        let mut ranked = Vec::with_capacity(candidates.len());
        let mut failures = Vec::new();
        for (index, outcome) in outcomes {
            match outcome {
                Ok(value) if value.is_finite() => ranked.push(ScoredCandidate {
                    parameters: candidates[index].clone(),
                    metric_value: value,
                }),
                Ok(value) => {
                    warn!("candidate {} excluded: non-finite metric {}", index, value);
                    failures.push(CandidateFailure {
                        index,
                        parameters: candidates[index].clone(),
                        reason: format!("non-finite metric value {}", value),
                    });
                }
                Err(err) => {
                    warn!("candidate {} excluded: {}", index, err);
                    failures.push(CandidateFailure {
                        index,
                        parameters: candidates[index].clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        if ranked.is_empty() {
            return Err(RegistrationError::ExplorationFailed {
                attempted: candidates.len(),
            });
        }

        // All values are finite here, so the ordering is total.
        ranked.sort_by(|a, b| {
            a.metric_value
                .partial_cmp(&b.metric_value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        info!(
            "explored {} candidates: {} ranked, {} excluded, best metric {:.6}",
            candidates.len(),
            ranked.len(),
            failures.len(),
            ranked[0].metric_value
        );

        Ok(Exploration { ranked, failures })
    }

    /// Explore, then refine the top-ranked candidates with the caller's
    /// full local registration and return the best refined result.
    ///
    /// Refine failures are isolated per candidate exactly like explore
    /// failures; the whole run errors only when no candidate survives both
    /// phases.
    pub fn explore_then_refine<E, R, T>(
        &self,
        candidates: &[Vec<f64>],
        evaluate: E,
        refine: R,
    ) -> Result<MultiStartResult<T>>
    where
        E: Fn(&[f64]) -> Result<f64> + Send + Sync,
        R: Fn(&[f64]) -> Result<Refined<T>>,
    {
        if self.config.keep == 0 {
            return Err(RegistrationError::invalid_configuration(
                "keep must be at least 1",
            ));
        }

        let exploration = self.explore(candidates, evaluate)?;

        let mut best: Option<(Refined<T>, Vec<f64>)> = None;
        let mut refine_failures = Vec::new();
        for (rank, candidate) in exploration.top(self.config.keep).iter().enumerate() {
            debug!(
                "refining candidate rank {} with explore metric {:.6}",
                rank, candidate.metric_value
            );
            match refine(&candidate.parameters) {
                Ok(refined) if refined.metric_value.is_finite() => {
                    let replace = match &best {
                        Some((current, _)) => refined.metric_value < current.metric_value,
                        None => true,
                    };
                    if replace {
                        best = Some((refined, candidate.parameters.clone()));
                    }
                }
                Ok(refined) => refine_failures.push(CandidateFailure {
                    index: rank,
                    parameters: candidate.parameters.clone(),
                    reason: format!("non-finite refined metric value {}", refined.metric_value),
                }),
                Err(err) => {
                    warn!("refinement of rank {} candidate failed: {}", rank, err);
                    refine_failures.push(CandidateFailure {
                        index: rank,
                        parameters: candidate.parameters.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        match best {
            Some((refined, initial_parameters)) => {
                info!(
                    "multi-start finished: best refined metric {:.6} from candidate {:?}",
                    refined.metric_value, initial_parameters
                );
                Ok(MultiStartResult {
                    best: refined,
                    initial_parameters,
                    exploration,
                    refine_failures,
                })
            }
            None => Err(RegistrationError::ExplorationFailed {
                attempted: candidates.len(),
            }),
        }
    }
}

/// Explore-then-refine with default settings and the given number of
/// candidates to refine.
pub fn explore_then_refine<E, R, T>(
    candidates: &[Vec<f64>],
    evaluate: E,
    refine: R,
    keep: usize,
) -> Result<MultiStartResult<T>>
where
    E: Fn(&[f64]) -> Result<f64> + Send + Sync,
    R: Fn(&[f64]) -> Result<Refined<T>>,
{
    MultiStart::new(MultiStartConfig::new().with_keep(keep))
        .explore_then_refine(candidates, evaluate, refine)
}

/// Cartesian product of per-axis sample values, for building candidate
/// grids (e.g. rotation angles sampled at 0, pi/2, pi, 3pi/2 per axis).
///
/// Ordering is deterministic: the first axis varies slowest. An empty axis
/// yields an empty grid.
pub fn parameter_grid(axes: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if axes.is_empty() || axes.iter().any(|axis| axis.is_empty()) {
        return Vec::new();
    }

    let mut grid: Vec<Vec<f64>> = vec![Vec::new()];
    for axis in axes {
        let mut next = Vec::with_capacity(grid.len() * axis.len());
        for prefix in &grid {
            for &value in axis {
                let mut candidate = prefix.clone();
                candidate.push(value);
                next.push(candidate);
            }
        }
        grid = next;
    }
    grid
}
