//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the subset-regression algorithms:
//! - Hyperplane fitting and residuals
//! - Robust loss functions (LTS, LMS, LQS, LQD, LTA, Pareto variants)
//! - Intercept correction passes
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Hyperplane fitting.
pub mod hyperplane;

/// Robust loss functions.
pub mod loss;

/// Intercept correction.
pub mod adjust;
