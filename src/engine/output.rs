//! Evaluation results.
//!
//! ## Purpose
//!
//! This module defines what one evaluation returns: the fitness, the pipeline
//! stage it finished in, and a snapshot of the winning hyperplane and the h
//! points it fit best.
//!
//! ## Design notes
//!
//! * **Owned**: Results own their data, so they can cross threads and outlive
//!   the genotype that produced them.
//! * **Display**: `Evaluation` renders a short human-readable summary.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::loss::Fitness;

// ============================================================================
// Pipeline Stage
// ============================================================================

/// Stages of the evaluation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EvaluationStage {
    /// Nothing done yet.
    Start,

    /// The subset names exactly d distinct points.
    SubsetValidated,

    /// Hyperplane fitted through the support points.
    InitialFit,

    /// Residuals computed for all points.
    ResidualsComputed,

    /// Intercept correction applied.
    Adjusted,

    /// Loss evaluated.
    Scored,

    /// Pipeline finished normally.
    Done,

    /// Subset was infeasible; a penalty fitness was returned.
    Penalized,
}

// ============================================================================
// Fitted Snapshot
// ============================================================================

/// The hyperplane of an evaluation and the indices of its h best-fitting points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FittedSnapshot<T> {
    /// Hyperplane coefficients (intercept first).
    pub hyperplane: Vec<T>,

    /// Indices of the h points with the smallest squared residuals, best first.
    pub chosen_indices: Vec<usize>,
}

// ============================================================================
// Evaluation
// ============================================================================

/// Outcome of evaluating one genotype.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<T> {
    /// Fitness handed back to the search engine.
    pub fitness: Fitness<T>,

    /// Stage the pipeline finished in (`Done` or `Penalized`).
    pub stage: EvaluationStage,

    /// Fitted hyperplane and chosen indices; `None` when penalized.
    pub snapshot: Option<FittedSnapshot<T>>,
}

impl<T> Evaluation<T> {
    /// Whether the genotype was infeasible and received the penalty.
    #[inline]
    pub fn is_penalized(&self) -> bool {
        self.stage == EvaluationStage::Penalized
    }
}

impl<T: Float + Display> Display for Evaluation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Stage:   {:?}", self.stage)?;
        writeln!(f, "  Fitness: {}", self.fitness)?;

        if let Some(snapshot) = &self.snapshot {
            writeln!(f)?;
            writeln!(f, "Hyperplane:")?;
            for (i, c) in snapshot.hyperplane.iter().enumerate() {
                let label = if i == 0 { "b0 (intercept)".to_string() } else { format!("b{i}") };
                writeln!(f, "  {label:>15} {c:>14.6}")?;
            }
            writeln!(f)?;
            write!(f, "Chosen indices ({}):", snapshot.chosen_indices.len())?;
            for idx in &snapshot.chosen_indices {
                write!(f, " {idx}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
