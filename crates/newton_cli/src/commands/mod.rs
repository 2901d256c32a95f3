//! CLI command implementations

pub mod check;
pub mod linear;
pub mod polynomial;
pub mod trig;

use newton_core::math::solvers::NewtonReport;
use tracing::info;

/// Log and print a successful solve
fn print_report(report: &NewtonReport<Vec<f64>>) {
    info!(
        iterations = report.iterations,
        residual_norm = report.residual_norm,
        "Converged"
    );
    let coordinates: Vec<String> = report.root.iter().map(|v| format!("{:.12}", v)).collect();
    println!("root          = [{}]", coordinates.join(", "));
    println!("iterations    = {}", report.iterations);
    println!("residual norm = {:e}", report.residual_norm);
}

/// Parse a comma-separated list of numbers
fn parse_vector(text: &str) -> crate::Result<Vec<f64>> {
    text.split(',')
        .map(|item| {
            item.trim().parse::<f64>().map_err(|_| {
                crate::CliError::invalid_argument(format!("not a number: '{}'", item.trim()))
            })
        })
        .collect()
}
