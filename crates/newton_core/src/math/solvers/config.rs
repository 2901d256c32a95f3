//! Solver configuration types.

use crate::math::jacobian::DifferenceScheme;
use crate::types::SolverError;

/// Configuration for the Newton root finder.
///
/// Immutable during a solve. Which derivative is used (analytic, dual-number
/// or finite-difference) is chosen when the solver is built; `step_scale`
/// and `scheme` only matter for the finite-difference fallback.
///
/// # Example
///
/// ```
/// use newton_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config = SolverConfig::default();
/// assert!(config.tolerance <= 1e-6);
/// assert!(config.max_radius.is_none());
///
/// // Custom configuration
/// let custom = SolverConfig::new(1e-12, 200).with_max_radius(1.0);
/// assert_eq!(custom.max_radius, Some(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Convergence tolerance on the residual.
    ///
    /// The solver stops when `‖f(x)‖ <= tolerance`.
    pub tolerance: f64,

    /// Maximum number of residual evaluations.
    ///
    /// If the residual test has not passed after this many evaluations,
    /// the solver returns `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,

    /// Trust radius: longest step the solver may take.
    ///
    /// Longer Newton steps are rescaled to exactly this length. `None`
    /// leaves step length unbounded.
    pub max_radius: Option<f64>,

    /// Perturbation size for finite-difference Jacobians.
    pub step_scale: f64,

    /// Finite-difference scheme for the fallback derivative.
    pub scheme: DifferenceScheme,

    /// Pivot magnitude at or below which the derivative counts as singular.
    pub singularity_tolerance: f64,
}

impl Default for SolverConfig {
    /// Default values:
    /// - `tolerance`: 1e-6
    /// - `max_iterations`: 100
    /// - `max_radius`: unbounded
    /// - `step_scale`: 1e-6
    /// - `scheme`: forward differences
    /// - `singularity_tolerance`: 1e-30
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            max_radius: None,
            step_scale: 1e-6,
            scheme: DifferenceScheme::Forward,
            singularity_tolerance: 1e-30,
        }
    }
}

impl SolverConfig {
    /// Create a configuration with the given tolerance and iteration budget.
    ///
    /// Remaining fields take their default values.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is not a positive finite number.
    ///
    /// # Example
    ///
    /// ```
    /// use newton_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-12, 200);
    /// assert_eq!(config.max_iterations, 200);
    /// ```
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(
            tolerance > 0.0 && tolerance.is_finite(),
            "tolerance must be positive"
        );
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Bound every step to at most `radius` in Euclidean length.
    pub fn with_max_radius(mut self, radius: f64) -> Self {
        self.max_radius = Some(radius);
        self
    }

    /// Set the finite-difference perturbation size.
    pub fn with_step_scale(mut self, step_scale: f64) -> Self {
        self.step_scale = step_scale;
        self
    }

    /// Set the finite-difference scheme.
    pub fn with_scheme(mut self, scheme: DifferenceScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Set the pivot magnitude treated as singular.
    pub fn with_singularity_tolerance(mut self, singularity_tolerance: f64) -> Self {
        self.singularity_tolerance = singularity_tolerance;
        self
    }

    /// Check every field, reporting the first invalid one.
    ///
    /// Deserialised configurations bypass [`SolverConfig::new`], so the
    /// solver calls this before each solve.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            return Err(SolverError::invalid_config(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if !(self.step_scale > 0.0 && self.step_scale.is_finite()) {
            return Err(SolverError::invalid_config(format!(
                "step_scale must be positive and finite, got {}",
                self.step_scale
            )));
        }
        if let Some(radius) = self.max_radius {
            if !(radius > 0.0 && radius.is_finite()) {
                return Err(SolverError::invalid_config(format!(
                    "max_radius must be positive and finite, got {}",
                    radius
                )));
            }
        }
        if !(self.singularity_tolerance >= 0.0 && self.singularity_tolerance.is_finite()) {
            return Err(SolverError::invalid_config(format!(
                "singularity_tolerance must be non-negative and finite, got {}",
                self.singularity_tolerance
            )));
        }
        Ok(())
    }
}
