//! High-level API for subset-regression fitness.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point. A fluent builder collects
//! the loss, quantile, adjust pass and penalty, then binds them to a point set
//! and hands back a [`SubsetFitness`] that a search engine calls once per
//! candidate subset.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`SubsetRegressionBuilder`] via `SubsetRegression::new()`.
//! 2. Chain configuration methods (`.loss()`, `.quantile()`, `.adjust()`).
//! 3. Call `.build(&points)` to get a [`SubsetFitness`].
//! 4. Call `.evaluate(&genotype)` for every candidate.
//!
//! ### Last Evaluation
//!
//! `SubsetFitness::evaluate` records the hyperplane and chosen indices of the
//! most recent call. The record is replaced on every call, including with
//! nothing when the genotype is penalized. Use [`SubsetFitness::evaluate_detached`]
//! or the executor directly when evaluating from several threads.

// External dependencies
use log::debug;

// Internal dependencies
use crate::engine::executor::{FitnessConfig, FitnessExecutor};
use crate::engine::validator::Validator;
use crate::math::linalg::FloatLinalg;

// Publicly re-exported types
pub use crate::algorithms::adjust::AdjustMethod;
pub use crate::algorithms::hyperplane::{Hyperplane, HyperplaneFit};
pub use crate::algorithms::loss::{Fitness, LossFunction, default_quantile};
pub use crate::engine::executor::AdjustPassFn;
pub use crate::engine::output::{Evaluation, EvaluationStage, FittedSnapshot};
pub use crate::math::select::{
    select_nth_smallest, select_nth_smallest_pairwise_difference,
};
pub use crate::primitives::errors::RegressionError;
pub use crate::primitives::genotype::{SubsetGenotype, SubsetSelection};
pub use crate::primitives::points::{Point, PointSet};
pub use crate::primitives::residuals::{ResidualEntry, ResidualSet};

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a subset-regression fitness.
#[derive(Debug, Clone)]
pub struct SubsetRegressionBuilder<T: FloatLinalg> {
    /// Loss function (default: LTS).
    pub loss: Option<LossFunction>,

    /// Quantile h (default: `⌊(n + d) / 2⌋` clamped to `[d, n]`).
    pub quantile: Option<usize>,

    /// Intercept correction (default: none).
    pub adjust: Option<AdjustMethod>,

    /// Fitness for infeasible genotypes (default: `-T::max_value()`).
    pub penalty: Option<T>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom adjust pass function.
    #[doc(hidden)]
    pub custom_adjust_pass: Option<AdjustPassFn<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: FloatLinalg> Default for SubsetRegressionBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FloatLinalg> SubsetRegressionBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            loss: None,
            quantile: None,
            adjust: None,
            penalty: None,
            custom_adjust_pass: None,
            duplicate_param: None,
        }
    }

    /// Set the loss function.
    pub fn loss(mut self, loss: LossFunction) -> Self {
        if self.loss.is_some() {
            self.duplicate_param = Some("loss");
        }
        self.loss = Some(loss);
        self
    }

    /// Set the quantile h, the number of residuals the loss is computed over.
    pub fn quantile(mut self, h: usize) -> Self {
        if self.quantile.is_some() {
            self.duplicate_param = Some("quantile");
        }
        self.quantile = Some(h);
        self
    }

    /// Enable an intercept correction pass.
    pub fn adjust(mut self, method: AdjustMethod) -> Self {
        if self.adjust.is_some() {
            self.duplicate_param = Some("adjust");
        }
        self.adjust = Some(method);
        self
    }

    /// Set the fitness returned for infeasible genotypes.
    pub fn penalty(mut self, penalty: T) -> Self {
        if self.penalty.is_some() {
            self.duplicate_param = Some("penalty");
        }
        self.penalty = Some(penalty);
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set a custom adjust pass function; replaces any `AdjustMethod`.
    #[doc(hidden)]
    pub fn custom_adjust_pass(mut self, pass: AdjustPassFn<T>) -> Self {
        self.custom_adjust_pass = Some(pass);
        self
    }

    /// Bind the configuration to a point set.
    pub fn build(self, points: &PointSet<T>) -> Result<SubsetFitness<T>, RegressionError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_point_set(points)?;

        let n = points.len();
        let d = points.dimension();

        let quantile = self.quantile.unwrap_or_else(|| default_quantile(n, d));
        Validator::validate_quantile(quantile, d, n)?;

        let penalty = self.penalty.unwrap_or_else(|| -T::max_value());
        Validator::validate_penalty(penalty)?;

        let loss = self.loss.unwrap_or_default();
        debug!("building subset fitness: n={n} d={d} h={quantile} loss={loss:?}");

        let executor = FitnessExecutor::new(FitnessConfig {
            loss,
            quantile,
            adjust: self.adjust,
            penalty,
            n_points: n,
            dimension: d,
            custom_adjust_pass: self.custom_adjust_pass,
        });

        Ok(SubsetFitness {
            executor,
            last: None,
        })
    }
}

// ============================================================================
// Fitness Engine
// ============================================================================

/// A configured fitness function bound to one point set's shape.
#[derive(Debug, Clone)]
pub struct SubsetFitness<T: FloatLinalg> {
    executor: FitnessExecutor<T>,
    last: Option<FittedSnapshot<T>>,
}

impl<T: FloatLinalg> SubsetFitness<T> {
    /// Evaluate a genotype and remember its hyperplane and chosen indices.
    pub fn evaluate<G>(&mut self, genotype: &G) -> Result<Fitness<T>, RegressionError>
    where
        G: SubsetGenotype<T> + ?Sized,
    {
        self.last = None;
        let evaluation = self.executor.evaluate(genotype)?;
        debug!(
            "evaluated genotype: stage={:?} fitness={:?}",
            evaluation.stage,
            evaluation.fitness.objectives()
        );
        self.last = evaluation.snapshot;
        Ok(evaluation.fitness)
    }

    /// Evaluate a genotype without touching the last-evaluation record.
    pub fn evaluate_detached<G>(&self, genotype: &G) -> Result<Evaluation<T>, RegressionError>
    where
        G: SubsetGenotype<T> + ?Sized,
    {
        self.executor.evaluate(genotype)
    }

    /// Evaluate a batch of genotypes, preserving order.
    #[cfg(feature = "parallel")]
    pub fn evaluate_many<G>(&self, genotypes: &[G]) -> Vec<Result<Evaluation<T>, RegressionError>>
    where
        G: SubsetGenotype<T> + Sync,
    {
        self.executor.evaluate_many(genotypes)
    }

    /// Evaluate a batch of genotypes, preserving order.
    #[cfg(not(feature = "parallel"))]
    pub fn evaluate_many<G>(&self, genotypes: &[G]) -> Vec<Result<Evaluation<T>, RegressionError>>
    where
        G: SubsetGenotype<T>,
    {
        self.executor.evaluate_many(genotypes)
    }

    /// Coefficients of the hyperplane from the last `evaluate` call.
    pub fn last_fitted_hyperplane(&self) -> Option<&[T]> {
        self.last.as_ref().map(|s| s.hyperplane.as_slice())
    }

    /// Indices of the h best-fitting points from the last `evaluate` call.
    pub fn last_chosen_indices(&self) -> Option<&[usize]> {
        self.last.as_ref().map(|s| s.chosen_indices.as_slice())
    }

    /// Snapshot from the last `evaluate` call.
    pub fn last_snapshot(&self) -> Option<&FittedSnapshot<T>> {
        self.last.as_ref()
    }

    /// The quantile h in use.
    pub fn quantile(&self) -> usize {
        self.executor.config().quantile
    }

    /// The loss function in use.
    pub fn loss(&self) -> LossFunction {
        self.executor.config().loss
    }

    /// The penalty fitness for infeasible genotypes.
    pub fn penalty(&self) -> T {
        self.executor.config().penalty
    }

    /// Whether an intercept pass is enabled.
    pub fn adjust_enabled(&self) -> bool {
        self.executor.adjust_enabled()
    }

    /// The underlying stateless executor.
    pub fn executor(&self) -> &FitnessExecutor<T> {
        &self.executor
    }
}
