//! CLI configuration management.
//!
//! Loads solver settings from a TOML file with environment variable
//! override support:
//!
//! ```toml
//! log_level = "debug"
//!
//! [solver]
//! tolerance = 1e-10
//! max_iterations = 50
//! max_radius = 1.0
//! scheme = "central"
//! ```

use newton_core::math::solvers::SolverConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// File is not valid TOML for this schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Environment override could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidOverride {
        /// Environment variable name
        key: String,
        /// Offending value
        value: String,
    },
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Solver settings
    #[serde(default)]
    pub solver: SolverConfig,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path` if it exists, else use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `NEWTON_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup (environment in production)
    fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup("NEWTON_TOLERANCE") {
            self.solver.tolerance = parse_override("NEWTON_TOLERANCE", &value)?;
        }

        if let Some(value) = lookup("NEWTON_MAX_ITERATIONS") {
            self.solver.max_iterations = parse_override("NEWTON_MAX_ITERATIONS", &value)?;
        }

        if let Some(value) = lookup("NEWTON_MAX_RADIUS") {
            self.solver.max_radius = Some(parse_override("NEWTON_MAX_RADIUS", &value)?);
        }

        if let Some(value) = lookup("NEWTON_STEP_SCALE") {
            self.solver.step_scale = parse_override("NEWTON_STEP_SCALE", &value)?;
        }

        if let Some(log_level) = lookup("NEWTON_LOG_LEVEL") {
            self.log_level = log_level;
        }

        Ok(self)
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
        })
}
