//! Finite-difference Jacobian approximation.
//!
//! Estimates the derivative of a function at a point by perturbing one
//! coordinate at a time:
//!
//! ```text
//! forward:  J[:, i] = (f(x + h·e_i) - f(x)) / h               O(h)
//! central:  J[:, i] = (f(x + h·e_i) - f(x - h·e_i)) / (2h)    O(h²)
//! ```
//!
//! For scalar inputs the result is the bare slope; for an n-vector input and
//! an m-vector output it is an m × n matrix. No error condition exists: a
//! badly chosen `h` produces a poor estimate, never a failure.

use super::linalg::Point;

/// Finite-difference scheme used to approximate a Jacobian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DifferenceScheme {
    /// One extra evaluation per coordinate, truncation error O(h).
    #[default]
    Forward,
    /// Two extra evaluations per coordinate, truncation error O(h²).
    Central,
}

/// Approximate the Jacobian of `f` at `x` with forward differences.
///
/// # Arguments
///
/// * `f` - Function to differentiate
/// * `x` - Point of evaluation (scalar or column vector)
/// * `step_scale` - Perturbation size `h`
///
/// # Example
///
/// ```
/// use newton_core::math::jacobian::approximate_jacobian;
///
/// let slope = approximate_jacobian(|x: &f64| 3.0 * x + 5.0, &2.0, 1e-3);
/// assert!((slope - 3.0).abs() < 1e-9);
/// ```
pub fn approximate_jacobian<X, F>(f: F, x: &X, step_scale: f64) -> X::Jacobian
where
    X: Point,
    F: Fn(&X) -> X,
{
    let fx = f(x);
    forward_difference_jacobian(&f, x, &fx, step_scale)
}

/// Forward-difference Jacobian reusing an already evaluated `fx = f(x)`.
///
/// Costs one evaluation of `f` per coordinate of `x`.
pub fn forward_difference_jacobian<X, F>(f: &F, x: &X, fx: &X, step_scale: f64) -> X::Jacobian
where
    X: Point,
    F: Fn(&X) -> X,
{
    let columns = (0..x.coordinate_count())
        .map(|i| f(&x.perturbed(i, step_scale)).difference(fx).divided(step_scale))
        .collect();
    X::assemble_jacobian(fx, columns)
}

/// Central-difference Jacobian of `f` at `x`.
///
/// `fx = f(x)` only fixes the output shape; the quotients use the two
/// evaluations either side of `x`, so each coordinate costs two calls.
///
/// # Example
///
/// ```
/// use newton_core::math::jacobian::central_difference_jacobian;
///
/// // d/dx x³ at x = 2 is 12
/// let f = |x: &f64| x * x * x;
/// let slope = central_difference_jacobian(&f, &2.0, &f(&2.0), 1e-4);
/// assert!((slope - 12.0).abs() < 1e-6);
/// ```
pub fn central_difference_jacobian<X, F>(f: &F, x: &X, fx: &X, step_scale: f64) -> X::Jacobian
where
    X: Point,
    F: Fn(&X) -> X,
{
    let columns = (0..x.coordinate_count())
        .map(|i| {
            let ahead = f(&x.perturbed(i, step_scale));
            let behind = f(&x.perturbed(i, -step_scale));
            ahead.difference(&behind).divided(2.0 * step_scale)
        })
        .collect();
    X::assemble_jacobian(fx, columns)
}
