//! Polynomial command implementation
//!
//! Finds a root of `c0 + c1·x + c2·x² + …`.

use newton_core::functions::Polynomial;
use newton_core::math::solvers::{NewtonReport, NewtonSolver, SolverConfig};
use tracing::info;

use crate::{CliError, Result};

/// Run the polynomial command
pub fn run(coefficients: &[f64], x0: f64, analytic: bool, config: SolverConfig) -> Result<()> {
    let report = solve(coefficients, x0, analytic, config)?;
    super::print_report(&NewtonReport {
        root: vec![report.root],
        iterations: report.iterations,
        residual_norm: report.residual_norm,
    });
    Ok(())
}

fn solve(
    coefficients: &[f64],
    x0: f64,
    analytic: bool,
    config: SolverConfig,
) -> Result<NewtonReport<f64>> {
    let polynomial = Polynomial::new(coefficients.to_vec());
    if polynomial.degree().map_or(true, |degree| degree == 0) {
        return Err(CliError::invalid_argument(
            "polynomial must have degree of at least 1",
        ));
    }

    info!("Solving polynomial with coefficients {:?}", polynomial.coefficients());
    info!("  Initial guess: {}", x0);

    let f = |x: &f64| polynomial.evaluate(*x);
    let report = if analytic {
        let slope = polynomial.derivative();
        NewtonSolver::with_derivative(f, |x: &f64| slope.evaluate(*x), config)
            .solve_with_report(x0)?
    } else {
        NewtonSolver::new(f, config).solve_with_report(x0)?
    };
    Ok(report)
}
