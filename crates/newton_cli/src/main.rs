//! newton CLI - Command Line Root Finding
//!
//! Thin driver around `newton_core` for solving small problems by hand.
//!
//! # Commands
//!
//! - `newton polynomial --coefficients -3,-2,1 --x0 3.3` - Root of a polynomial
//! - `newton trig --a 1 --b 1 --c 0 --x0 -0.5` - Root of `a·sin x + b·cos x + c`
//! - `newton linear --matrix "1,-1;1,1" --rhs -7,15` - Solve `A·x = b`
//! - `newton check` - Print the effective solver configuration
//!
//! Solver settings come from `newton.toml` (if present), then `NEWTON_*`
//! environment variables, then command-line flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use newton_core::functions::TrigonometricFunction;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::CliConfig;

/// Newton-Raphson root finder CLI
#[derive(Parser)]
#[command(name = "newton")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "newton.toml")]
    config: PathBuf,

    /// Residual tolerance
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    /// Maximum number of residual evaluations
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Trust radius bounding each step
    #[arg(long, global = true)]
    max_radius: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a root of a polynomial
    Polynomial {
        /// Coefficients in ascending order of degree
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        coefficients: Vec<f64>,

        /// Initial guess
        #[arg(long, allow_negative_numbers = true)]
        x0: f64,

        /// Use the analytic derivative instead of finite differences
        #[arg(long)]
        analytic: bool,
    },

    /// Find a root of a·sin x + b·cos x + c
    Trig {
        /// Sine amplitude
        #[arg(long, allow_negative_numbers = true)]
        a: f64,

        /// Cosine amplitude
        #[arg(long, allow_negative_numbers = true)]
        b: f64,

        /// Constant offset
        #[arg(long, allow_negative_numbers = true)]
        c: f64,

        /// Initial guess
        #[arg(long, allow_negative_numbers = true)]
        x0: f64,

        /// Use the analytic derivative instead of finite differences
        #[arg(long)]
        analytic: bool,
    },

    /// Solve the linear system A·x = b
    Linear {
        /// Matrix rows separated by ';', entries by ','
        #[arg(long, allow_hyphen_values = true)]
        matrix: String,

        /// Right-hand side, comma separated
        #[arg(long, allow_hyphen_values = true)]
        rhs: String,

        /// Initial guess, comma separated (defaults to zeros)
        #[arg(long, allow_hyphen_values = true)]
        x0: Option<String>,
    },

    /// Check the effective configuration
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load_or_default(&cli.config)
        .and_then(CliConfig::with_env_override)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(tolerance) = cli.tolerance {
        config.solver.tolerance = tolerance;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.solver.max_iterations = max_iterations;
    }
    if let Some(max_radius) = cli.max_radius {
        config.solver.max_radius = Some(max_radius);
    }

    // Initialise tracing
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let solver = config.solver;
    match cli.command {
        Commands::Polynomial {
            coefficients,
            x0,
            analytic,
        } => commands::polynomial::run(&coefficients, x0, analytic, solver)?,
        Commands::Trig {
            a,
            b,
            c,
            x0,
            analytic,
        } => commands::trig::run(TrigonometricFunction::new(a, b, c), x0, analytic, solver)?,
        Commands::Linear { matrix, rhs, x0 } => {
            commands::linear::run(&matrix, &rhs, x0.as_deref(), solver)?
        }
        Commands::Check => commands::check::run(&config)?,
    }

    Ok(())
}
