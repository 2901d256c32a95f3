//! Newton-Raphson root-finding solver.

use super::{AnalyticDerivative, DerivativeProvider, FiniteDifference, SolverConfig};
use crate::math::linalg::{LinearSolveFailure, Point};
use crate::types::{EvaluationStage, SolverError};
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Outcome of a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonReport<X> {
    /// Point where `‖f(x)‖ <= tolerance`.
    pub root: X,
    /// Number of Newton steps taken to reach it.
    pub iterations: usize,
    /// Residual norm at `root`.
    pub residual_norm: f64,
}

/// Newton-Raphson root finder for scalar and vector functions.
///
/// Uses Newton's method: solve `J(x_n) · δ = f(x_n)` and set
/// `x_{n+1} = x_n - δ`, with `δ` optionally rescaled so that
/// `‖δ‖ <= max_radius`.
///
/// # Type Parameters
///
/// * `X` - Point type: `f64`, `DVector<f64>` or `SVector<f64, N>`
/// * `F` - Target function `x -> f(x)`
/// * `P` - Derivative strategy (finite differences unless stated otherwise)
///
/// # Convergence
///
/// Convergence is judged on the residual `‖f(x)‖`, never on the step size.
/// Near a simple root the iteration converges quadratically. It may fail if:
/// - The derivative is singular at an iterate
/// - The initial guess lies outside the basin of attraction
/// - The function has no real root
///
/// Each of these is reported as a distinct [`SolverError`].
///
/// # Example
///
/// ```
/// use newton_core::math::solvers::{NewtonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2) with a finite-difference derivative
/// let solver = NewtonSolver::new(|x: &f64| x * x - 2.0, SolverConfig::new(1e-12, 50));
///
/// let root = solver.solve(1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Clone)]
pub struct NewtonSolver<X, F, P = FiniteDifference> {
    function: F,
    derivative: P,
    config: SolverConfig,
    _point: PhantomData<fn(&X) -> X>,
}

impl<X, F> NewtonSolver<X, F, FiniteDifference>
where
    X: Point,
    F: Fn(&X) -> X,
{
    /// Create a solver that approximates the derivative numerically.
    ///
    /// The perturbation size and scheme come from `config`.
    pub fn new(function: F, config: SolverConfig) -> Self {
        let derivative = FiniteDifference::from_config(&config);
        Self::with_provider(function, derivative, config)
    }
}

impl<X, F, D> NewtonSolver<X, F, AnalyticDerivative<D>>
where
    X: Point,
    F: Fn(&X) -> X,
    D: Fn(&X) -> X::Jacobian,
{
    /// Create a solver with an analytic derivative.
    ///
    /// # Example
    ///
    /// ```
    /// use newton_core::math::solvers::{NewtonSolver, SolverConfig};
    ///
    /// // Solve x³ - x - 2 = 0
    /// let solver = NewtonSolver::with_derivative(
    ///     |x: &f64| x * x * x - x - 2.0,
    ///     |x: &f64| 3.0 * x * x - 1.0,
    ///     SolverConfig::new(1e-10, 50),
    /// );
    ///
    /// let root = solver.solve(1.5).unwrap();
    /// assert!((root * root * root - root - 2.0).abs() < 1e-10);
    /// ```
    pub fn with_derivative(function: F, derivative: D, config: SolverConfig) -> Self {
        Self::with_provider(function, AnalyticDerivative(derivative), config)
    }
}

impl<X, F, P> NewtonSolver<X, F, P>
where
    X: Point,
    F: Fn(&X) -> X,
    P: DerivativeProvider<X>,
{
    /// Create a solver with an explicit derivative strategy.
    pub fn with_provider(function: F, derivative: P, config: SolverConfig) -> Self {
        Self {
            function,
            derivative,
            config,
            _point: PhantomData,
        }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns a reference to the derivative strategy.
    pub fn derivative(&self) -> &P {
        &self.derivative
    }

    /// Take one Newton step from `x`.
    ///
    /// `fx` is `f(x)` if the caller already has it; otherwise it is
    /// evaluated here. Both forms yield the same result. The solver itself
    /// is never mutated.
    ///
    /// # Errors
    ///
    /// * `SolverError::NonFiniteValue` - `x`, `f(x)` or `J(x)` is not finite
    /// * `SolverError::SingularDerivative` - `J(x)` cannot be inverted
    /// * `SolverError::Diverged` - the update overflowed
    /// * `SolverError::DimensionMismatch` - `J(x)` is not square
    /// * `SolverError::InvalidConfig` - the configuration was rejected
    pub fn step(&self, x: &X, fx: Option<&X>) -> Result<X, SolverError> {
        self.check_start(x)?;

        let evaluated;
        let fx = match fx {
            Some(fx) => fx,
            None => {
                evaluated = (self.function)(x);
                &evaluated
            }
        };
        if !fx.all_finite() {
            warn!("target function returned a non-finite value");
            return Err(non_finite(EvaluationStage::Function, 0, x));
        }

        self.advance(0, x, fx)
    }

    /// Find a root starting from `x0`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `‖f(x)‖ <= tolerance`; `x0` itself, unchanged,
    ///   if it already satisfies the test
    /// * `Err(SolverError::MaxIterationsExceeded)` - Budget exhausted
    /// * `Err(SolverError::SingularDerivative)` - Derivative not invertible
    /// * `Err(SolverError::NonFiniteValue)` - `f` or `J` returned NaN/∞
    /// * `Err(SolverError::Diverged)` - Iterate left the finite range
    pub fn solve(&self, x0: X) -> Result<X, SolverError> {
        self.solve_with_report(x0).map(|report| report.root)
    }

    /// Find a root starting from `x0`, reporting iterations and residual.
    ///
    /// The budget counts residual evaluations: a step is only taken when
    /// another residual test remains, so the iterate attached to
    /// `MaxIterationsExceeded` is the one whose residual was reported.
    pub fn solve_with_report(&self, x0: X) -> Result<NewtonReport<X>, SolverError> {
        self.check_start(&x0)?;

        let max_iterations = self.config.max_iterations;
        let mut x = x0;
        let mut residual_norm = f64::NAN;

        for iteration in 0..max_iterations {
            let fx = (self.function)(&x);
            if !fx.all_finite() {
                warn!(iteration, "target function returned a non-finite value");
                return Err(non_finite(EvaluationStage::Function, iteration, &x));
            }

            residual_norm = fx.euclidean_norm();
            debug!(iteration, residual_norm, "newton residual");

            if residual_norm <= self.config.tolerance {
                return Ok(NewtonReport {
                    root: x,
                    iterations: iteration,
                    residual_norm,
                });
            }

            if iteration + 1 == max_iterations {
                break;
            }

            x = self.advance(iteration, &x, &fx)?;
        }

        warn!(
            iterations = max_iterations,
            residual_norm, "newton iteration budget exhausted"
        );
        Err(SolverError::MaxIterationsExceeded {
            iterations: max_iterations,
            residual_norm,
            last_iterate: x.to_coordinates(),
        })
    }

    /// Reject an invalid configuration or a non-finite starting point.
    fn check_start(&self, x: &X) -> Result<(), SolverError> {
        if let Err(err) = self.config.validate() {
            warn!(%err, "solver configuration rejected");
            return Err(err);
        }
        if !x.all_finite() {
            warn!("initial guess is not finite");
            return Err(non_finite(EvaluationStage::InitialGuess, 0, x));
        }
        Ok(())
    }

    /// Newton update from `x` with known finite residual `fx`.
    fn advance(&self, iteration: usize, x: &X, fx: &X) -> Result<X, SolverError> {
        let jacobian = self.derivative.jacobian(&self.function, x, fx);
        if !X::jacobian_is_finite(&jacobian) {
            warn!(iteration, "derivative returned a non-finite value");
            return Err(non_finite(EvaluationStage::Derivative, iteration, x));
        }

        let delta = X::solve_linear(&jacobian, fx, self.config.singularity_tolerance).map_err(
            |failure| match failure {
                LinearSolveFailure::Singular => {
                    warn!(iteration, "singular derivative");
                    SolverError::SingularDerivative {
                        iteration,
                        x: x.to_coordinates(),
                    }
                }
                LinearSolveFailure::Shape { rows, cols, rhs } => {
                    warn!(rows, cols, residual_len = rhs, "jacobian does not match residual");
                    SolverError::DimensionMismatch {
                        rows,
                        cols,
                        residual_len: rhs,
                    }
                }
            },
        )?;

        let delta = self.clamp(delta);
        let next = x.difference(&delta);
        if !delta.all_finite() || !next.all_finite() {
            warn!(iteration, "newton update overflowed");
            return Err(SolverError::Diverged {
                iteration,
                x: x.to_coordinates(),
            });
        }

        debug!(iteration, step_norm = delta.euclidean_norm(), "newton step");
        Ok(next)
    }

    /// Rescale `delta` to the trust radius if it is longer.
    fn clamp(&self, delta: X) -> X {
        match self.config.max_radius {
            Some(radius) => {
                let length = delta.euclidean_norm();
                if length > radius {
                    debug!(length, radius, "step clamped to trust radius");
                    delta.scaled(radius / length)
                } else {
                    delta
                }
            }
            None => delta,
        }
    }
}

impl<X, F, P: fmt::Debug> fmt::Debug for NewtonSolver<X, F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewtonSolver")
            .field("derivative", &self.derivative)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn non_finite<X: Point>(stage: EvaluationStage, iteration: usize, x: &X) -> SolverError {
    SolverError::NonFiniteValue {
        stage,
        iteration,
        x: x.to_coordinates(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{DMatrix, DVector, Vector2};

    // ========================================
    // Basic Functionality Tests
    // ========================================

    #[test]
    fn test_exact_root_returned_unchanged() {
        let solver = NewtonSolver::new(|x: &f64| 3.0 * x + 6.0, SolverConfig::new(1e-15, 2));
        let root = solver.solve(-2.0).unwrap();
        assert_eq!(root.to_bits(), (-2.0_f64).to_bits());
    }

    #[test]
    fn test_linear_from_nearby_guess() {
        let solver = NewtonSolver::new(|x: &f64| 3.0 * x + 6.0, SolverConfig::new(1e-9, 10));
        let root = solver.solve(2.0).unwrap();
        assert_abs_diff_eq!(root, -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_quadratic_roots() {
        let f = |x: &f64| x * x - 2.0 * x - 3.0;
        let solver = NewtonSolver::new(f, SolverConfig::default());

        let upper = solver.solve(3.3).unwrap();
        assert_abs_diff_eq!(upper, 3.0, epsilon = 1e-6);

        let lower = solver.solve(-0.8).unwrap();
        assert_abs_diff_eq!(lower, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_double_root_converges() {
        let f = |x: &f64| x * x - 2.0 * x + 1.0;
        let solver = NewtonSolver::new(f, SolverConfig::default());

        let report = solver.solve_with_report(0.0).unwrap();

        assert!(report.residual_norm <= 1e-6);
        assert!((report.root - 1.0).abs() < 1.1e-3);
        // Linear rate: roughly one bit per step
        assert!(report.iterations >= 5);
    }

    #[test]
    fn test_two_dimensional_linear_system() {
        let f = |x: &DVector<f64>| {
            DVector::from_vec(vec![x[0] - x[1] + 7.0, x[0] + x[1] - 15.0])
        };
        let solver = NewtonSolver::new(f, SolverConfig::default());

        let root = solver.solve(DVector::from_vec(vec![3.0, 2.0])).unwrap();
        assert_abs_diff_eq!(root[0], 4.0, epsilon = 1e-6);
        assert_abs_diff_eq!(root[1], 11.0, epsilon = 1e-6);
    }

    #[test]
    fn test_static_vector_system() {
        let f = |x: &Vector2<f64>| Vector2::new(x[0] * x[0] - 4.0, x[0] * x[1] - 2.0);
        let solver = NewtonSolver::new(f, SolverConfig::new(1e-10, 50));

        let root = solver.solve(Vector2::new(1.0, 1.0)).unwrap();
        assert_abs_diff_eq!(root[0], 2.0, epsilon = 1e-8);
        assert_abs_diff_eq!(root[1], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_analytic_jacobian_vector() {
        let solver = NewtonSolver::with_derivative(
            |x: &DVector<f64>| DVector::from_vec(vec![x[0] * x[0] + x[1] * x[1] - 1.0, x[0] - x[1]]),
            |x: &DVector<f64>| {
                DMatrix::from_row_slice(2, 2, &[2.0 * x[0], 2.0 * x[1], 1.0, -1.0])
            },
            SolverConfig::new(1e-12, 50),
        );

        let root = solver.solve(DVector::from_vec(vec![1.0, 0.5])).unwrap();
        let expected = std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(root[0], expected, epsilon = 1e-10);
        assert_abs_diff_eq!(root[1], expected, epsilon = 1e-10);
    }

    #[test]
    fn test_report_counts_steps() {
        let solver = NewtonSolver::new(|x: &f64| 3.0 * x + 6.0, SolverConfig::new(1e-9, 10));

        let at_root = solver.solve_with_report(-2.0).unwrap();
        assert_eq!(at_root.iterations, 0);
        assert_eq!(at_root.residual_norm, 0.0);

        let from_afar = solver.solve_with_report(10.0).unwrap();
        assert!(from_afar.iterations >= 1);
    }

    #[test]
    fn test_central_scheme_solve() {
        let config = SolverConfig::new(1e-12, 50)
            .with_scheme(crate::math::jacobian::DifferenceScheme::Central)
            .with_step_scale(1e-5);
        let solver = NewtonSolver::new(
            |x: &DVector<f64>| DVector::from_vec(vec![x[0] * x[0] - 4.0, x[0] * x[1] - 2.0]),
            config,
        );

        let root = solver.solve(DVector::from_vec(vec![1.0, 1.0])).unwrap();
        assert_abs_diff_eq!(root[0], 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(root[1], 1.0, epsilon = 1e-10);
    }

    // ========================================
    // Step Tests
    // ========================================

    #[test]
    fn test_step_with_and_without_residual_agree() {
        let f = |x: &f64| x * x - 2.0 * x - 3.0;
        let solver = NewtonSolver::new(f, SolverConfig::default());

        let x0 = 3.3;
        let computed = solver.step(&x0, None).unwrap();
        let supplied = solver.step(&x0, Some(&f(&x0))).unwrap();
        assert_eq!(computed.to_bits(), supplied.to_bits());
    }

    #[test]
    fn test_step_vector_with_and_without_residual_agree() {
        let f = |x: &DVector<f64>| DVector::from_vec(vec![x[0] * x[1] - 1.0, x[0] - 2.0 * x[1]]);
        let solver = NewtonSolver::new(f, SolverConfig::default());

        let x0 = DVector::from_vec(vec![1.5, 0.5]);
        let computed = solver.step(&x0, None).unwrap();
        let supplied = solver.step(&x0, Some(&f(&x0))).unwrap();
        assert_eq!(computed, supplied);
    }

    #[test]
    fn test_central_step_reuses_supplied_residual() {
        use std::cell::Cell;

        let calls = Cell::new(0usize);
        let f = |x: &f64| {
            calls.set(calls.get() + 1);
            x * x - 2.0
        };
        let config = SolverConfig::default()
            .with_scheme(crate::math::jacobian::DifferenceScheme::Central);
        let solver = NewtonSolver::new(f, config);

        solver.step(&1.5, Some(&0.25)).unwrap();
        // Two evaluations either side of x, none at x itself
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_step_is_newton_update() {
        let solver = NewtonSolver::with_derivative(
            |x: &f64| x * x - 4.0,
            |x: &f64| 2.0 * x,
            SolverConfig::default(),
        );
        // x - (x² - 4) / 2x at x = 4: 4 - 12/8
        assert_eq!(solver.step(&4.0, None).unwrap(), 2.5);
    }

    // ========================================
    // Trust Radius Tests
    // ========================================

    fn flat_tails(x: &f64) -> f64 {
        x / (x * x + 1.0)
    }

    fn flat_tails_slope(x: &f64) -> f64 {
        (1.0 - x * x) / ((x * x + 1.0) * (x * x + 1.0))
    }

    #[test]
    fn test_max_radius_clamps_step_length() {
        let config = SolverConfig::default().with_max_radius(1.0);
        let solver = NewtonSolver::with_derivative(flat_tails, flat_tails_slope, config);

        // Unclamped step from 0.6 would be ≈ 1.275
        let next = solver.step(&0.6, None).unwrap();
        assert_abs_diff_eq!(next, -0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_max_radius_leaves_short_steps_alone() {
        let clamped = NewtonSolver::with_derivative(
            flat_tails,
            flat_tails_slope,
            SolverConfig::default().with_max_radius(1.0),
        );
        let free = NewtonSolver::with_derivative(flat_tails, flat_tails_slope, SolverConfig::default());

        assert_eq!(clamped.step(&0.4, None).unwrap(), free.step(&0.4, None).unwrap());
    }

    #[test]
    fn test_max_radius_converges_from_flat_region() {
        let config = SolverConfig::default().with_max_radius(1.0);
        let solver = NewtonSolver::new(flat_tails, config);

        assert_abs_diff_eq!(solver.solve(0.4).unwrap(), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(solver.solve(0.6).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_without_radius_escapes_into_flat_tail() {
        // 0.6 -> -0.675 -> 1.13 -> 10.4, then |x| roughly doubles each step
        // until x/(x²+1) <= 1e-6 far away from the only root at 0.
        let solver = NewtonSolver::new(flat_tails, SolverConfig::new(1e-6, 50));
        let report = solver.solve_with_report(0.6).unwrap();

        assert!(report.root > 1e5, "expected escape, got {}", report.root);
        assert!(report.residual_norm <= 1e-6);
        assert!(report.iterations < 50);
    }

    #[test]
    fn test_max_radius_clamps_vector_step() {
        let config = SolverConfig::default().with_max_radius(0.5);
        let solver = NewtonSolver::with_derivative(
            |x: &DVector<f64>| x.clone(),
            |x: &DVector<f64>| DMatrix::identity(x.len(), x.len()),
            config,
        );

        let x0 = DVector::from_vec(vec![3.0, 4.0]);
        let next = solver.step(&x0, None).unwrap();
        // δ = x0 (length 5) rescaled to length 0.5
        assert_abs_diff_eq!(next[0], 2.7, epsilon = 1e-12);
        assert_abs_diff_eq!(next[1], 3.6, epsilon = 1e-12);
    }

    #[test]
    fn test_max_radius_clamps_overflowing_norm() {
        // ‖δ‖² overflows although every coordinate of δ is finite
        let config = SolverConfig::default().with_max_radius(1.0);
        let solver = NewtonSolver::with_derivative(
            |x: &DVector<f64>| x.map(|v| 1e200 * (v - 1.0)),
            |x: &DVector<f64>| DMatrix::identity(x.len(), x.len()),
            config,
        );

        let x0 = DVector::from_vec(vec![2.0, 2.0]);
        let next = solver.step(&x0, None).unwrap();

        let expected = 2.0 - std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(next[0], expected, epsilon = 1e-12);
        assert_abs_diff_eq!(next[1], expected, epsilon = 1e-12);
        assert_abs_diff_eq!((&x0 - &next).norm(), 1.0, epsilon = 1e-12);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_no_real_root_exhausts_budget() {
        let solver = NewtonSolver::new(|x: &f64| x * x + 1.0, SolverConfig::new(1e-6, 50));

        match solver.solve(0.5) {
            Err(SolverError::MaxIterationsExceeded {
                iterations,
                residual_norm,
                last_iterate,
            }) => {
                assert_eq!(iterations, 50);
                assert!(residual_norm >= 1.0);
                assert_eq!(last_iterate.len(), 1);
            }
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_iterations_fails_without_evaluating() {
        let solver = NewtonSolver::new(
            |_: &f64| -> f64 { panic!("must not be evaluated") },
            SolverConfig::new(1e-6, 0),
        );

        match solver.solve(1.0) {
            Err(SolverError::MaxIterationsExceeded {
                iterations,
                residual_norm,
                last_iterate,
            }) => {
                assert_eq!(iterations, 0);
                assert!(residual_norm.is_nan());
                assert_eq!(last_iterate, vec![1.0]);
            }
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
    }

    #[test]
    fn test_budget_counts_residual_evaluations() {
        use std::cell::Cell;

        let calls = Cell::new(0usize);
        let solver = NewtonSolver::with_derivative(
            |x: &f64| {
                calls.set(calls.get() + 1);
                x * x + 1.0
            },
            |x: &f64| 2.0 * x,
            SolverConfig::new(1e-6, 2),
        );

        let err = solver.solve(2.0).unwrap_err();
        assert!(err.is_convergence_failure());
        assert_eq!(calls.get(), 2);
        // One step was taken: 2 - 5/4
        assert_eq!(err.last_iterate(), Some(&[0.75][..]));
    }

    #[test]
    fn test_single_iteration_budget_tests_without_stepping() {
        use std::cell::Cell;

        let calls = Cell::new(0usize);
        let solver = NewtonSolver::with_derivative(
            |x: &f64| {
                calls.set(calls.get() + 1);
                x * x - 4.0
            },
            |x: &f64| 2.0 * x,
            SolverConfig::new(1e-6, 1),
        );

        match solver.solve(3.0) {
            Err(SolverError::MaxIterationsExceeded {
                iterations,
                residual_norm,
                last_iterate,
            }) => {
                assert_eq!(iterations, 1);
                assert_eq!(residual_norm, 5.0);
                assert_eq!(last_iterate, vec![3.0]);
            }
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_zero_derivative_is_singular() {
        let solver = NewtonSolver::with_derivative(
            |x: &f64| x * x + 1.0,
            |x: &f64| 2.0 * x,
            SolverConfig::default(),
        );

        match solver.solve(0.0) {
            Err(SolverError::SingularDerivative { iteration, x }) => {
                assert_eq!(iteration, 0);
                assert_eq!(x, vec![0.0]);
            }
            other => panic!("Expected SingularDerivative error, got {:?}", other),
        }
    }

    #[test]
    fn test_singular_jacobian_matrix() {
        let solver = NewtonSolver::with_derivative(
            |x: &DVector<f64>| {
                DVector::from_vec(vec![x[0] + x[1] - 1.0, 2.0 * x[0] + 2.0 * x[1] - 5.0])
            },
            |_: &DVector<f64>| DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 2.0, 2.0]),
            SolverConfig::default(),
        );

        let result = solver.solve(DVector::from_vec(vec![0.0, 0.0]));
        assert!(matches!(result, Err(SolverError::SingularDerivative { .. })));
    }

    #[test]
    fn test_non_finite_function_value() {
        let solver = NewtonSolver::new(|x: &f64| x.ln(), SolverConfig::default());

        match solver.solve(-1.0) {
            Err(SolverError::NonFiniteValue { stage, .. }) => {
                assert_eq!(stage, EvaluationStage::Function);
            }
            other => panic!("Expected NonFiniteValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_derivative_value() {
        let solver = NewtonSolver::with_derivative(
            |x: &f64| x - 1.0,
            |_: &f64| f64::INFINITY,
            SolverConfig::default(),
        );

        match solver.solve(3.0) {
            Err(SolverError::NonFiniteValue { stage, iteration, .. }) => {
                assert_eq!(stage, EvaluationStage::Derivative);
                assert_eq!(iteration, 0);
            }
            other => panic!("Expected NonFiniteValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_initial_guess() {
        let solver = NewtonSolver::new(|x: &f64| x - 1.0, SolverConfig::default());
        assert!(matches!(
            solver.solve(f64::NAN),
            Err(SolverError::NonFiniteValue {
                stage: EvaluationStage::InitialGuess,
                ..
            })
        ));
    }

    #[test]
    fn test_unbounded_growth_is_divergence() {
        // Newton on the cube root doubles |x| every step. The slope shrinks
        // like |x|^(-2/3), so the pivot test is disabled to reach overflow.
        let solver = NewtonSolver::with_derivative(
            |x: &f64| x.cbrt(),
            |x: &f64| x.abs().powf(-2.0 / 3.0) / 3.0,
            SolverConfig::new(1e-6, 5000).with_singularity_tolerance(0.0),
        );

        match solver.solve(1.0) {
            Err(SolverError::Diverged { iteration, x }) => {
                assert!(iteration > 1000);
                assert!(x[0].abs() > 1e300);
            }
            other => panic!("Expected Diverged error, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let solver = NewtonSolver::with_derivative(
            |x: &DVector<f64>| DVector::from_vec(vec![x[0] - 1.0, x[1] - 1.0]),
            |_: &DVector<f64>| DMatrix::from_row_slice(2, 1, &[1.0, 1.0]),
            SolverConfig::default(),
        );

        let result = solver.solve(DVector::from_vec(vec![0.0, 0.0]));
        assert_eq!(
            result,
            Err(SolverError::DimensionMismatch {
                rows: 2,
                cols: 1,
                residual_len: 2
            })
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SolverConfig {
            step_scale: 0.0,
            ..SolverConfig::default()
        };
        let solver = NewtonSolver::new(|x: &f64| x - 1.0, config);
        assert!(matches!(solver.solve(0.0), Err(SolverError::InvalidConfig(_))));
        assert!(matches!(solver.step(&0.0, None), Err(SolverError::InvalidConfig(_))));
    }

    #[test]
    fn test_failures_emit_warnings() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let bad_config = SolverConfig {
                step_scale: 0.0,
                ..SolverConfig::default()
            };
            let _ = NewtonSolver::new(|x: &f64| x - 1.0, bad_config).solve(0.0);
            let _ = NewtonSolver::new(|x: &f64| x - 1.0, SolverConfig::default()).solve(f64::NAN);
            let _ = NewtonSolver::with_derivative(
                |x: &DVector<f64>| x.clone(),
                |_: &DVector<f64>| DMatrix::from_row_slice(2, 1, &[1.0, 1.0]),
                SolverConfig::default(),
            )
            .solve(DVector::from_vec(vec![1.0, 1.0]));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("solver configuration rejected"), "{}", output);
        assert!(output.contains("initial guess is not finite"), "{}", output);
        assert!(output.contains("jacobian does not match residual"), "{}", output);
    }

    // ========================================
    // Solver Object Tests
    // ========================================

    #[test]
    fn test_config_accessor() {
        let config = SolverConfig::new(1e-8, 50);
        let solver = NewtonSolver::new(|x: &f64| x - 1.0, config);

        assert_eq!(solver.config().tolerance, 1e-8);
        assert_eq!(solver.config().max_iterations, 50);
        assert_eq!(solver.derivative().step_scale, config.step_scale);
    }

    #[test]
    fn test_solve_does_not_mutate_solver() {
        let solver = NewtonSolver::new(|x: &f64| x * x - 2.0, SolverConfig::new(1e-12, 50));
        let first = solver.solve(1.0).unwrap();
        let second = solver.solve(1.0).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_shared_across_threads() {
        let solver = NewtonSolver::new(|x: &f64| x * x - 2.0, SolverConfig::new(1e-12, 50));

        let roots: Vec<f64> = std::thread::scope(|scope| {
            let handles: Vec<_> = [1.0, 2.0, 3.0]
                .into_iter()
                .map(|x0| {
                    let solver = &solver;
                    scope.spawn(move || solver.solve(x0).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for root in roots {
            assert_abs_diff_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_debug_output() {
        let solver = NewtonSolver::new(|x: &f64| x - 1.0, SolverConfig::default());
        let output = format!("{:?}", solver);
        assert!(output.contains("NewtonSolver"));
        assert!(output.contains("FiniteDifference"));
    }
}
