//! Derivative strategies for the Newton solver.
//!
//! A [`DerivativeProvider`] is chosen once, when the solver is built:
//!
//! - [`FiniteDifference`]: numerical Jacobian (the default fallback)
//! - [`AnalyticDerivative`]: user-supplied derivative closure
//! - `DualDerivative`: forward-mode AD of a scalar function via `Dual64`
//!   (requires the `num-dual-mode` feature)

use super::SolverConfig;
use crate::math::jacobian::{
    central_difference_jacobian, forward_difference_jacobian, DifferenceScheme,
};
use crate::math::linalg::Point;

/// Source of the derivative `J(x)` used in each Newton step.
pub trait DerivativeProvider<X: Point> {
    /// Derivative of `f` at `x`, given the already evaluated `fx = f(x)`.
    fn jacobian<F>(&self, f: &F, x: &X, fx: &X) -> X::Jacobian
    where
        F: Fn(&X) -> X;
}

/// Finite-difference derivative.
///
/// # Example
///
/// ```
/// use newton_core::math::solvers::{DerivativeProvider, FiniteDifference};
///
/// let provider = FiniteDifference::default();
/// let f = |x: &f64| x * x;
/// let slope = provider.jacobian(&f, &3.0, &f(&3.0));
/// assert!((slope - 6.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    /// Perturbation size `h`.
    pub step_scale: f64,
    /// Forward or central differences.
    pub scheme: DifferenceScheme,
}

impl FiniteDifference {
    /// Create a finite-difference provider.
    pub fn new(step_scale: f64, scheme: DifferenceScheme) -> Self {
        Self { step_scale, scheme }
    }

    /// Provider matching `config.step_scale` and `config.scheme`.
    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.step_scale, config.scheme)
    }
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self::from_config(&SolverConfig::default())
    }
}

impl<X: Point> DerivativeProvider<X> for FiniteDifference {
    fn jacobian<F>(&self, f: &F, x: &X, fx: &X) -> X::Jacobian
    where
        F: Fn(&X) -> X,
    {
        match self.scheme {
            DifferenceScheme::Forward => forward_difference_jacobian(f, x, fx, self.step_scale),
            DifferenceScheme::Central => central_difference_jacobian(f, x, fx, self.step_scale),
        }
    }
}

/// Analytic derivative supplied as a closure `x -> J(x)`.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticDerivative<D>(pub D);

impl<X, D> DerivativeProvider<X> for AnalyticDerivative<D>
where
    X: Point,
    D: Fn(&X) -> X::Jacobian,
{
    fn jacobian<F>(&self, _f: &F, x: &X, _fx: &X) -> X::Jacobian
    where
        F: Fn(&X) -> X,
    {
        (self.0)(x)
    }
}

#[cfg(feature = "num-dual-mode")]
pub use dual::DualDerivative;

#[cfg(feature = "num-dual-mode")]
mod dual {
    use super::{DerivativeProvider, SolverConfig};
    use crate::math::solvers::NewtonSolver;
    use num_dual::Dual64;

    /// Exact scalar derivative by forward-mode automatic differentiation.
    ///
    /// Holds the dual-number form of the target function; each call seeds
    /// `x + 1ε` and reads the derivative from the `eps` part.
    #[derive(Debug, Clone, Copy)]
    pub struct DualDerivative<G>(pub G);

    impl<G> DualDerivative<G>
    where
        G: Fn(Dual64) -> Dual64 + Clone,
    {
        /// Build a scalar solver whose function and derivative both come
        /// from the dual-number closure `g`.
        ///
        /// # Example
        ///
        /// ```
        /// use newton_core::math::solvers::{DualDerivative, SolverConfig};
        /// use num_dual::Dual64;
        ///
        /// // Solve x² - 2 = 0
        /// let solver = DualDerivative::solver(
        ///     |x: Dual64| x * x - Dual64::from(2.0),
        ///     SolverConfig::new(1e-12, 50),
        /// );
        /// let root = solver.solve(1.0).unwrap();
        /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
        /// ```
        pub fn solver(
            g: G,
            config: SolverConfig,
        ) -> NewtonSolver<f64, impl Fn(&f64) -> f64, DualDerivative<G>> {
            let value = g.clone();
            NewtonSolver::with_provider(
                move |x: &f64| value(Dual64::from(*x)).re,
                DualDerivative(g),
                config,
            )
        }
    }

    impl<G> DerivativeProvider<f64> for DualDerivative<G>
    where
        G: Fn(Dual64) -> Dual64,
    {
        fn jacobian<F>(&self, _f: &F, x: &f64, _fx: &f64) -> f64
        where
            F: Fn(&f64) -> f64,
        {
            (self.0)(Dual64::new(*x, 1.0)).eps
        }
    }
}
