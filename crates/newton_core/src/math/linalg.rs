//! Point types the solver iterates over.
//!
//! A [`Point`] is anything with coordinates, a Euclidean norm and a square
//! linear solve against its Jacobian type. Scalars are the one-coordinate
//! case, so the Newton step and the radius clamp share a single code path:
//!
//! | Point              | Jacobian             |
//! |--------------------|----------------------|
//! | `f64`              | `f64`                |
//! | `DVector<f64>`     | `DMatrix<f64>`       |
//! | `SVector<f64, N>`  | `SMatrix<f64, N, N>` |

use nalgebra::dimension::{Const, DimMin};
use nalgebra::{DMatrix, DVector, SMatrix, SVector};
use std::fmt::Debug;

/// Why a linear solve `J · δ = r` could not be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearSolveFailure {
    /// A pivot was at or below the singularity tolerance.
    Singular,
    /// The system is not square or does not match the right-hand side.
    Shape {
        /// Rows of the system matrix
        rows: usize,
        /// Columns of the system matrix
        cols: usize,
        /// Length of the right-hand side
        rhs: usize,
    },
}

/// A point in the domain (and range) of a target function.
///
/// # Example
///
/// ```
/// use nalgebra::DVector;
/// use newton_core::math::linalg::Point;
///
/// let x = DVector::from_vec(vec![3.0, 4.0]);
/// assert_eq!(x.coordinate_count(), 2);
/// assert!((x.euclidean_norm() - 5.0).abs() < 1e-15);
/// assert!((2.0_f64).perturbed(0, 0.5) == 2.5);
/// ```
pub trait Point: Clone + Debug {
    /// Derivative representation: output-dimension × input-dimension.
    type Jacobian: Clone + Debug;

    /// Number of coordinates (1 for scalars).
    fn coordinate_count(&self) -> usize;

    /// Euclidean norm; absolute value for scalars.
    ///
    /// Finite for every finite point, even when the sum of squares would
    /// overflow.
    fn euclidean_norm(&self) -> f64;

    /// `true` if every coordinate is finite.
    fn all_finite(&self) -> bool;

    /// Copy of `self` with `h` added to coordinate `index` only.
    fn perturbed(&self, index: usize, h: f64) -> Self;

    /// `self * factor`.
    fn scaled(&self, factor: f64) -> Self;

    /// `self / divisor`.
    fn divided(&self, divisor: f64) -> Self;

    /// `self - other`.
    fn difference(&self, other: &Self) -> Self;

    /// Coordinates as a plain vector.
    fn to_coordinates(&self) -> Vec<f64>;

    /// Assemble a Jacobian from difference-quotient columns.
    ///
    /// `reference` is `f(x)` and fixes the row count, so a zero-dimensional
    /// input still yields a correctly shaped (m × 0) result.
    fn assemble_jacobian(reference: &Self, columns: Vec<Self>) -> Self::Jacobian;

    /// `true` if every Jacobian entry is finite.
    fn jacobian_is_finite(jacobian: &Self::Jacobian) -> bool;

    /// Solve `jacobian · δ = rhs` for `δ`.
    ///
    /// Fails with [`LinearSolveFailure::Singular`] when a pivot magnitude is
    /// at or below `singularity_tolerance`.
    fn solve_linear(
        jacobian: &Self::Jacobian,
        rhs: &Self,
        singularity_tolerance: f64,
    ) -> Result<Self, LinearSolveFailure>;
}

impl Point for f64 {
    type Jacobian = f64;

    fn coordinate_count(&self) -> usize {
        1
    }

    fn euclidean_norm(&self) -> f64 {
        f64::abs(*self)
    }

    fn all_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn perturbed(&self, _index: usize, h: f64) -> Self {
        *self + h
    }

    fn scaled(&self, factor: f64) -> Self {
        *self * factor
    }

    fn divided(&self, divisor: f64) -> Self {
        *self / divisor
    }

    fn difference(&self, other: &Self) -> Self {
        *self - *other
    }

    fn to_coordinates(&self) -> Vec<f64> {
        vec![*self]
    }

    fn assemble_jacobian(_reference: &Self, columns: Vec<Self>) -> f64 {
        columns.first().copied().unwrap_or_default()
    }

    fn jacobian_is_finite(jacobian: &f64) -> bool {
        f64::is_finite(*jacobian)
    }

    fn solve_linear(
        jacobian: &f64,
        rhs: &Self,
        singularity_tolerance: f64,
    ) -> Result<Self, LinearSolveFailure> {
        if f64::abs(*jacobian) <= singularity_tolerance {
            return Err(LinearSolveFailure::Singular);
        }
        Ok(*rhs / *jacobian)
    }
}

impl Point for DVector<f64> {
    type Jacobian = DMatrix<f64>;

    fn coordinate_count(&self) -> usize {
        self.len()
    }

    fn euclidean_norm(&self) -> f64 {
        let scale = self.amax();
        if scale == 0.0 || !scale.is_finite() {
            return scale;
        }
        scale * self.unscale(scale).norm()
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|v| v.is_finite())
    }

    fn perturbed(&self, index: usize, h: f64) -> Self {
        let mut shifted = self.clone();
        shifted[index] += h;
        shifted
    }

    fn scaled(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    fn divided(&self, divisor: f64) -> Self {
        self.map(|v| v / divisor)
    }

    fn difference(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a - b)
    }

    fn to_coordinates(&self) -> Vec<f64> {
        self.iter().copied().collect()
    }

    fn assemble_jacobian(reference: &Self, columns: Vec<Self>) -> DMatrix<f64> {
        DMatrix::from_fn(reference.len(), columns.len(), |i, j| columns[j][i])
    }

    fn jacobian_is_finite(jacobian: &DMatrix<f64>) -> bool {
        jacobian.iter().all(|v| v.is_finite())
    }

    fn solve_linear(
        jacobian: &DMatrix<f64>,
        rhs: &Self,
        singularity_tolerance: f64,
    ) -> Result<Self, LinearSolveFailure> {
        lu_solve(jacobian.clone(), rhs, singularity_tolerance)
    }
}

impl<const N: usize> Point for SVector<f64, N>
where
    Const<N>: DimMin<Const<N>, Output = Const<N>>,
{
    type Jacobian = SMatrix<f64, N, N>;

    fn coordinate_count(&self) -> usize {
        N
    }

    fn euclidean_norm(&self) -> f64 {
        let scale = self.amax();
        if scale == 0.0 || !scale.is_finite() {
            return scale;
        }
        scale * self.unscale(scale).norm()
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|v| v.is_finite())
    }

    fn perturbed(&self, index: usize, h: f64) -> Self {
        let mut shifted = *self;
        shifted[index] += h;
        shifted
    }

    fn scaled(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    fn divided(&self, divisor: f64) -> Self {
        self.map(|v| v / divisor)
    }

    fn difference(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a - b)
    }

    fn to_coordinates(&self) -> Vec<f64> {
        self.iter().copied().collect()
    }

    fn assemble_jacobian(_reference: &Self, columns: Vec<Self>) -> SMatrix<f64, N, N> {
        SMatrix::from_fn(|i, j| columns[j][i])
    }

    fn jacobian_is_finite(jacobian: &SMatrix<f64, N, N>) -> bool {
        jacobian.iter().all(|v| v.is_finite())
    }

    fn solve_linear(
        jacobian: &SMatrix<f64, N, N>,
        rhs: &Self,
        singularity_tolerance: f64,
    ) -> Result<Self, LinearSolveFailure> {
        let lu = jacobian.lu();
        check_pivots(lu.u().diagonal().iter(), singularity_tolerance)?;
        lu.solve(rhs).ok_or(LinearSolveFailure::Singular)
    }
}

/// LU solve with partial pivoting and a pivot-magnitude singularity test.
fn lu_solve(
    system: DMatrix<f64>,
    rhs: &DVector<f64>,
    singularity_tolerance: f64,
) -> Result<DVector<f64>, LinearSolveFailure> {
    let (rows, cols) = system.shape();
    if rows != cols || rows != rhs.len() {
        return Err(LinearSolveFailure::Shape {
            rows,
            cols,
            rhs: rhs.len(),
        });
    }

    let lu = system.lu();
    check_pivots(lu.u().diagonal().iter(), singularity_tolerance)?;
    lu.solve(rhs).ok_or(LinearSolveFailure::Singular)
}

/// Reject an LU factorisation with any pivot at or below the tolerance.
fn check_pivots<'a>(
    pivots: impl IntoIterator<Item = &'a f64>,
    singularity_tolerance: f64,
) -> Result<(), LinearSolveFailure> {
    if pivots
        .into_iter()
        .any(|pivot| pivot.abs() <= singularity_tolerance)
    {
        return Err(LinearSolveFailure::Singular);
    }
    Ok(())
}
