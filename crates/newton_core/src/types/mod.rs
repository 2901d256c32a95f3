//! Shared types for the solver layer.
//!
//! - `error`: structured failure modes of the Newton iteration
//!
//! # Re-exports
//!
//! [`SolverError`] and [`EvaluationStage`] are re-exported at this level.

pub mod error;

pub use error::{EvaluationStage, SolverError};
