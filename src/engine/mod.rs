//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates one fitness evaluation:
//! - Configuration and genotype validation
//! - The fit → residuals → adjust → score pipeline
//! - Result assembly
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Pipeline execution.
pub mod executor;

/// Evaluation results.
pub mod output;

/// Input validation.
pub mod validator;
