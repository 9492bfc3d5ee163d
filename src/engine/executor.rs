//! Execution engine for subset-regression fitness evaluation.
//!
//! ## Purpose
//!
//! This module provides the executor that turns a genotype into a fitness. It
//! runs the evaluation pipeline once per call:
//!
//! ```text
//! Start → SubsetValidated → InitialFit → ResidualsComputed → [Adjusted] → Scored → Done
//!           └──────────→ Penalized (infeasible subset)
//! ```
//!
//! ## Design notes
//!
//! * **Pure**: An evaluation reads only the configuration and the genotype's point
//!   set, allocates its own buffers, and returns an owned result. Identical inputs
//!   give bit-identical outputs, and the executor is `Send + Sync`.
//! * **Injected adjust**: The intercept pass is chosen at construction, either as
//!   an `AdjustMethod` or as a custom pass function.
//! * **Error policy**: Infeasible or unresolvable subsets become the configured
//!   penalty; singular systems and invalid order indices propagate.
//!
//! ## Invariants
//!
//! * `d <= h <= n` for the configured quantile.
//! * A returned fitness is never NaN.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration (handled by `validator` and the builder).
//! * This module does not cache results.

// External dependencies
use log::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// Internal dependencies
use crate::algorithms::adjust::AdjustMethod;
use crate::algorithms::hyperplane::{Hyperplane, HyperplaneFit};
use crate::algorithms::loss::{Fitness, LossFunction};
use crate::engine::output::{Evaluation, EvaluationStage, FittedSnapshot};
use crate::engine::validator::Validator;
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::RegressionError;
use crate::primitives::genotype::SubsetGenotype;
use crate::primitives::points::{Point, PointSet};
use crate::primitives::residuals::ResidualSet;

// ============================================================================
// Custom Pass Types
// ============================================================================

/// Custom intercept-correction pass.
///
/// Receives the point set, the fitted hyperplane, its residuals and the quantile h.
/// Must leave `residuals` consistent with `hyperplane`.
pub type AdjustPassFn<T> = fn(
    &PointSet<T>,
    &mut Hyperplane<T>,
    &mut ResidualSet<T>,
    usize,
) -> Result<(), RegressionError>;

// ============================================================================
// Configuration
// ============================================================================

/// Resolved configuration of a fitness executor.
#[derive(Debug, Clone)]
pub struct FitnessConfig<T> {
    /// Loss used to score residuals.
    pub loss: LossFunction,

    /// Quantile h.
    pub quantile: usize,

    /// Intercept correction, if enabled.
    pub adjust: Option<AdjustMethod>,

    /// Fitness returned for infeasible genotypes.
    pub penalty: T,

    /// Number of points (n) the executor was built for.
    pub n_points: usize,

    /// Point dimension (d) the executor was built for.
    pub dimension: usize,

    /// Custom intercept pass; takes precedence over `adjust`.
    #[doc(hidden)]
    pub custom_adjust_pass: Option<AdjustPassFn<T>>,
}

// ============================================================================
// Executor
// ============================================================================

/// Runs the evaluation pipeline for one configuration.
#[derive(Debug, Clone)]
pub struct FitnessExecutor<T> {
    config: FitnessConfig<T>,
}

impl<T: FloatLinalg> FitnessExecutor<T> {
    /// Create an executor from a resolved configuration.
    pub fn new(config: FitnessConfig<T>) -> Self {
        debug!(
            "fitness executor: loss={:?} h={} n={} d={} adjust={:?}",
            config.loss, config.quantile, config.n_points, config.dimension, config.adjust
        );
        Self { config }
    }

    /// The executor's configuration.
    #[inline]
    pub fn config(&self) -> &FitnessConfig<T> {
        &self.config
    }

    /// Whether an intercept pass runs after the initial fit.
    #[inline]
    pub fn adjust_enabled(&self) -> bool {
        self.config.adjust.is_some() || self.config.custom_adjust_pass.is_some()
    }

    /// Evaluate one genotype.
    pub fn evaluate<G>(&self, genotype: &G) -> Result<Evaluation<T>, RegressionError>
    where
        G: SubsetGenotype<T> + ?Sized,
    {
        trace!("stage {:?}", EvaluationStage::Start);
        let points = genotype.all_points();
        Validator::validate_shape(points, self.config.n_points, self.config.dimension)?;

        let indices = genotype.chosen_indices();
        if let Err(err) =
            Validator::check_subset(indices, self.config.dimension, self.config.n_points)
        {
            debug!("penalizing genotype: {err}");
            return Ok(self.penalized());
        }

        let support = match genotype.chosen_subset() {
            Some(support) if support.len() == self.config.dimension => support,
            _ => {
                debug!("penalizing genotype: chosen subset does not resolve to d points");
                return Ok(self.penalized());
            }
        };
        trace!("stage {:?}", EvaluationStage::SubsetValidated);

        self.run_pipeline(points, &support)
    }

    /// Evaluate a slice of genotypes, preserving order.
    ///
    /// With the `parallel` feature the genotypes are spread over the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn evaluate_many<G>(&self, genotypes: &[G]) -> Vec<Result<Evaluation<T>, RegressionError>>
    where
        G: SubsetGenotype<T> + Sync,
    {
        genotypes.par_iter().map(|g| self.evaluate(g)).collect()
    }

    /// Evaluate a slice of genotypes, preserving order.
    #[cfg(not(feature = "parallel"))]
    pub fn evaluate_many<G>(&self, genotypes: &[G]) -> Vec<Result<Evaluation<T>, RegressionError>>
    where
        G: SubsetGenotype<T>,
    {
        genotypes.iter().map(|g| self.evaluate(g)).collect()
    }

    /// The evaluation handed out for infeasible genotypes.
    pub fn penalized(&self) -> Evaluation<T> {
        let penalty = self.config.penalty;
        let fitness = if self.config.loss.is_multi_objective() {
            Fitness::Vector(vec![penalty; self.config.loss.objective_count()])
        } else {
            Fitness::Scalar(penalty)
        };
        Evaluation {
            fitness,
            stage: EvaluationStage::Penalized,
            snapshot: None,
        }
    }

    fn run_pipeline(
        &self,
        points: &PointSet<T>,
        support: &[&Point<T>],
    ) -> Result<Evaluation<T>, RegressionError> {
        let h = self.config.quantile;

        let mut hyperplane = HyperplaneFit::fit_from_support(support)?;
        trace!("stage {:?}", EvaluationStage::InitialFit);

        let mut residuals = HyperplaneFit::residuals_against(&hyperplane, points.points())?;
        trace!("stage {:?}", EvaluationStage::ResidualsComputed);

        if let Some(pass) = self.config.custom_adjust_pass {
            pass(points, &mut hyperplane, &mut residuals, h)?;
            trace!("stage {:?} (custom pass)", EvaluationStage::Adjusted);
        } else if let Some(method) = self.config.adjust {
            method.apply(points, &mut hyperplane, &mut residuals, h)?;
            trace!("stage {:?} ({:?})", EvaluationStage::Adjusted, method);
        }

        let fitness = self.config.loss.score(points, &residuals, h)?;
        trace!("stage {:?}", EvaluationStage::Scored);

        let chosen_indices = residuals
            .smallest_by_squared(h)
            .iter()
            .map(|e| e.index)
            .collect();
        let snapshot = FittedSnapshot {
            hyperplane: hyperplane.into_coefficients(),
            chosen_indices,
        };

        trace!("stage {:?}", EvaluationStage::Done);
        Ok(Evaluation {
            fitness,
            stage: EvaluationStage::Done,
            snapshot: Some(snapshot),
        })
    }
}
