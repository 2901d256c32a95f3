//! Simple test functions for exercising the solver.
//!
//! - [`Polynomial`]: `c0 + c1·x + c2·x² + …` with an analytic derivative
//! - [`TrigonometricFunction`]: `a·sin x + b·cos x + c`
//!
//! Both are plain evaluators; wrap them in a closure to hand them to a
//! [`NewtonSolver`](crate::math::solvers::NewtonSolver).

use num_traits::Float;

/// Polynomial with coefficients in ascending order of degree.
///
/// # Example
///
/// ```
/// use newton_core::functions::Polynomial;
///
/// // p(x) = x² + 5x + 4
/// let p = Polynomial::new(vec![4.0, 5.0, 1.0]);
/// assert_eq!(p.evaluate(1.0), 10.0);
/// assert_eq!(p.derivative().evaluate(1.0), 7.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T: Float> {
    coefficients: Vec<T>,
}

impl<T: Float> Polynomial<T> {
    /// Create a polynomial from ascending coefficients.
    ///
    /// Trailing zero coefficients are dropped, so `degree` reflects the
    /// highest non-zero term.
    pub fn new(mut coefficients: Vec<T>) -> Self {
        while coefficients.last().is_some_and(|c| c.is_zero()) {
            coefficients.pop();
        }
        Self { coefficients }
    }

    /// Coefficients in ascending order of degree.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Degree of the polynomial; `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    /// Evaluate at `x` using Horner's scheme.
    pub fn evaluate(&self, x: T) -> T {
        self.coefficients
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * x + c)
    }

    /// The derivative polynomial.
    pub fn derivative(&self) -> Self {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, &c)| c * T::from(power).unwrap_or_else(T::nan))
            .collect();
        Self::new(coefficients)
    }
}

/// `a·sin x + b·cos x + c`.
///
/// # Example
///
/// ```
/// use newton_core::functions::TrigonometricFunction;
///
/// let f = TrigonometricFunction::new(2.0, 2.0, 4.0);
/// assert_eq!(f.evaluate(0.0), 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigonometricFunction<T: Float> {
    /// Sine amplitude
    pub a: T,
    /// Cosine amplitude
    pub b: T,
    /// Constant offset
    pub c: T,
}

impl<T: Float> TrigonometricFunction<T> {
    /// Create `a·sin x + b·cos x + c`.
    pub fn new(a: T, b: T, c: T) -> Self {
        Self { a, b, c }
    }

    /// Evaluate at `x`.
    pub fn evaluate(&self, x: T) -> T {
        self.a * x.sin() + self.b * x.cos() + self.c
    }

    /// Derivative `a·cos x - b·sin x` at `x`.
    pub fn derivative_at(&self, x: T) -> T {
        self.a * x.cos() - self.b * x.sin()
    }
}
