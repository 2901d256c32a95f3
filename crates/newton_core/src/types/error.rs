//! Error types for root finding.
//!
//! This module provides:
//! - `SolverError`: every way a Newton solve can stop without a root
//! - `EvaluationStage`: which user callable produced a non-finite value

use std::fmt;
use thiserror::Error;

/// The user-supplied callable (or input) that produced a non-finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvaluationStage {
    /// The initial guess handed to the solver.
    InitialGuess,
    /// The target function `f(x)`.
    Function,
    /// The derivative or Jacobian at `x`.
    Derivative,
}

impl fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationStage::InitialGuess => write!(f, "initial guess"),
            EvaluationStage::Function => write!(f, "function"),
            EvaluationStage::Derivative => write!(f, "derivative"),
        }
    }
}

/// Solver error types.
///
/// Each variant is a hard stop of the current solve. Iterates are stored as
/// plain coordinate vectors so that the error type is independent of the
/// point representation (`f64`, `DVector`, `SVector`).
///
/// # Examples
/// ```
/// use newton_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded {
///     iterations: 100,
///     residual_norm: 0.5,
///     last_iterate: vec![1.0],
/// };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// The iteration budget ran out before the residual met the tolerance.
    #[error("Failed to converge after {iterations} iterations (residual norm {residual_norm})")]
    MaxIterationsExceeded {
        /// Iteration budget that was exhausted
        iterations: usize,
        /// Residual norm at the last iterate (`NaN` if none was evaluated)
        residual_norm: f64,
        /// Coordinates of the last iterate
        last_iterate: Vec<f64>,
    },

    /// The derivative could not be inverted at the current iterate.
    #[error("Singular derivative at iteration {iteration}, x = {x:?}")]
    SingularDerivative {
        /// Iteration index at which the solve failed (0 for a standalone step)
        iteration: usize,
        /// Coordinates of the iterate
        x: Vec<f64>,
    },

    /// A user callable returned NaN or infinity.
    #[error("Non-finite {stage} value at iteration {iteration}, x = {x:?}")]
    NonFiniteValue {
        /// Which callable produced the value
        stage: EvaluationStage,
        /// Iteration index at which the solve failed
        iteration: usize,
        /// Coordinates of the iterate
        x: Vec<f64>,
    },

    /// The Newton update left the finite range.
    #[error("Newton iteration diverged at iteration {iteration}, x = {x:?}")]
    Diverged {
        /// Iteration index at which the update overflowed
        iteration: usize,
        /// Coordinates of the last finite iterate
        x: Vec<f64>,
    },

    /// The Jacobian is not square or does not match the residual length.
    #[error("Jacobian is {rows}x{cols} but the residual has {residual_len} entries")]
    DimensionMismatch {
        /// Rows of the Jacobian
        rows: usize,
        /// Columns of the Jacobian
        cols: usize,
        /// Length of the residual vector
        residual_len: usize,
    },

    /// The solver configuration was rejected.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),
}

impl SolverError {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Coordinates of the iterate attached to this error, if any.
    pub fn last_iterate(&self) -> Option<&[f64]> {
        match self {
            SolverError::MaxIterationsExceeded { last_iterate, .. } => Some(last_iterate),
            SolverError::SingularDerivative { x, .. }
            | SolverError::NonFiniteValue { x, .. }
            | SolverError::Diverged { x, .. } => Some(x),
            SolverError::DimensionMismatch { .. } | SolverError::InvalidConfig(_) => None,
        }
    }

    /// Returns `true` if the iteration budget was exhausted.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, SolverError::MaxIterationsExceeded { .. })
    }
}
