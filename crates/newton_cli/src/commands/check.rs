//! Check command implementation
//!
//! Prints the effective configuration after file and environment overrides.

use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    config.solver.validate()?;

    let solver = &config.solver;
    println!("tolerance             = {:e}", solver.tolerance);
    println!("max_iterations        = {}", solver.max_iterations);
    match solver.max_radius {
        Some(radius) => println!("max_radius            = {}", radius),
        None => println!("max_radius            = unbounded"),
    }
    println!("step_scale            = {:e}", solver.step_scale);
    println!("scheme                = {:?}", solver.scheme);
    println!("singularity_tolerance = {:e}", solver.singularity_tolerance);
    println!("log_level             = {}", config.log_level);

    info!("Configuration OK");
    Ok(())
}
