//! Trig command implementation
//!
//! Finds a root of `a·sin x + b·cos x + c`.

use newton_core::functions::TrigonometricFunction;
use newton_core::math::solvers::{NewtonReport, NewtonSolver, SolverConfig};
use tracing::info;

use crate::Result;

/// Run the trig command
pub fn run(
    function: TrigonometricFunction<f64>,
    x0: f64,
    analytic: bool,
    config: SolverConfig,
) -> Result<()> {
    info!(
        "Solving {}·sin x + {}·cos x + {}",
        function.a, function.b, function.c
    );
    info!("  Initial guess: {}", x0);

    let f = |x: &f64| function.evaluate(*x);
    let report = if analytic {
        NewtonSolver::with_derivative(f, |x: &f64| function.derivative_at(*x), config)
            .solve_with_report(x0)?
    } else {
        NewtonSolver::new(f, config).solve_with_report(x0)?
    };

    super::print_report(&NewtonReport {
        root: vec![report.root],
        iterations: report.iterations,
        residual_norm: report.residual_norm,
    });
    Ok(())
}
