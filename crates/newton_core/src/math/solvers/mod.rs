//! Root-finding solvers for numerical computation.
//!
//! ## Available Solvers
//!
//! - [`NewtonSolver`]: Newton-Raphson for scalar and vector functions
//!
//! ## Derivative Strategies
//!
//! The derivative is fixed when the solver is built:
//! - [`FiniteDifference`]: numerical Jacobian (default, via [`NewtonSolver::new`])
//! - [`AnalyticDerivative`]: user closure (via [`NewtonSolver::with_derivative`])
//! - `DualDerivative`: dual-number AD for scalar functions (`num-dual-mode`)
//!
//! ## Configuration
//!
//! [`SolverConfig`] holds:
//! - `tolerance`: Residual tolerance (default: 1e-6)
//! - `max_iterations`: Residual evaluation budget (default: 100)
//! - `max_radius`: Optional trust radius per step
//! - `step_scale`, `scheme`: Finite-difference settings
//!
//! ## Examples
//!
//! ```
//! use nalgebra::DVector;
//! use newton_core::math::solvers::{NewtonSolver, SolverConfig};
//!
//! // x1 - x2 + 7 = 0, x1 + x2 - 15 = 0
//! let f = |x: &DVector<f64>| DVector::from_vec(vec![x[0] - x[1] + 7.0, x[0] + x[1] - 15.0]);
//! let solver = NewtonSolver::new(f, SolverConfig::default());
//!
//! let root = solver.solve(DVector::from_vec(vec![3.0, 2.0])).unwrap();
//! assert!((root[0] - 4.0).abs() < 1e-6);
//! assert!((root[1] - 11.0).abs() < 1e-6);
//! ```

mod config;
mod derivative;
mod newton_raphson;

// Re-export public types at module level
pub use config::SolverConfig;
#[cfg(feature = "num-dual-mode")]
pub use derivative::DualDerivative;
pub use derivative::{AnalyticDerivative, DerivativeProvider, FiniteDifference};
pub use newton_raphson::{NewtonReport, NewtonSolver};
