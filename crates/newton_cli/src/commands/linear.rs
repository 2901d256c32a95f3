//! Linear command implementation
//!
//! Solves `A·x = b` by Newton iteration on `f(x) = A·x - b`, with a
//! finite-difference Jacobian.

use nalgebra::{DMatrix, DVector};
use newton_core::math::solvers::{NewtonReport, NewtonSolver, SolverConfig};
use tracing::info;

use super::parse_vector;
use crate::{CliError, Result};

/// Run the linear command
///
/// `matrix` lists rows separated by `;` and entries by `,`, e.g. `"1,-1;1,1"`.
pub fn run(matrix: &str, rhs: &str, x0: Option<&str>, config: SolverConfig) -> Result<()> {
    let a = parse_matrix(matrix)?;
    let b = DVector::from_vec(parse_vector(rhs)?);
    if !a.is_square() || a.nrows() != b.len() {
        return Err(CliError::invalid_argument(format!(
            "matrix is {}x{} but right-hand side has {} entries",
            a.nrows(),
            a.ncols(),
            b.len()
        )));
    }

    let start = match x0 {
        Some(text) => DVector::from_vec(parse_vector(text)?),
        None => DVector::zeros(b.len()),
    };
    if start.len() != b.len() {
        return Err(CliError::invalid_argument(format!(
            "initial guess has {} entries, expected {}",
            start.len(),
            b.len()
        )));
    }

    info!("Solving {}x{} linear system", a.nrows(), a.ncols());

    let f = |x: &DVector<f64>| &a * x - &b;
    let report = NewtonSolver::new(f, config).solve_with_report(start)?;

    super::print_report(&NewtonReport {
        root: report.root.iter().copied().collect(),
        iterations: report.iterations,
        residual_norm: report.residual_norm,
    });
    Ok(())
}

/// Parse `"a,b;c,d"` into a row-major matrix
fn parse_matrix(text: &str) -> Result<DMatrix<f64>> {
    let rows = text
        .split(';')
        .map(parse_vector)
        .collect::<Result<Vec<_>>>()?;
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(CliError::invalid_argument("matrix rows differ in length"));
    }
    Ok(DMatrix::from_row_slice(rows.len(), ncols, &rows.concat()))
}
