//! # newton_core: Newton-Raphson Root Finding
//!
//! ## Role
//!
//! newton_core is the numerical kernel of the workspace, providing:
//! - A point abstraction unifying scalars and vectors (`math::linalg`)
//! - Finite-difference Jacobians, forward and central (`math::jacobian`)
//! - The Newton-Raphson solver and its configuration (`math::solvers`)
//! - Structured solver errors (`types::error`)
//! - Simple test functions: polynomials and trigonometric sums (`functions`)
//!
//! ## Minimal Dependencies
//!
//! - nalgebra: dense vectors, matrices and LU factorisation
//! - num-traits: generic floating-point evaluation of test functions
//! - num-dual: dual-number derivatives (optional)
//! - thiserror: error derivation
//! - tracing: per-iteration diagnostics (no subscriber is installed here)
//!
//! ## Usage Examples
//!
//! ```rust
//! use newton_core::math::jacobian::approximate_jacobian;
//! use newton_core::math::solvers::{NewtonSolver, SolverConfig};
//! use newton_core::types::SolverError;
//!
//! // Scalar root of x² - 2x - 3 from a finite-difference derivative
//! let solver = NewtonSolver::new(|x: &f64| x * x - 2.0 * x - 3.0, SolverConfig::default());
//! let root = solver.solve(3.3).unwrap();
//! # assert!((root - 3.0).abs() < 1e-6);
//!
//! // Derivative estimate on its own
//! let slope = approximate_jacobian(|x: &f64| 4.0 * x - 1.0, &10.0, 1e-6);
//! # assert!((slope - 4.0).abs() < 1e-6);
//!
//! // No real root: reported as budget exhaustion, not a fake root
//! let solver = NewtonSolver::new(|x: &f64| x * x + 1.0, SolverConfig::new(1e-6, 20));
//! assert!(matches!(solver.solve(0.5), Err(SolverError::MaxIterationsExceeded { .. })));
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): `DualDerivative` for exact scalar derivatives
//! - `serde` (default): serialisation for `SolverConfig` and `SolverError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod functions;
pub mod math;
pub mod types;
