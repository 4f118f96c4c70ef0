//! Shared solver configuration.

use serde::Deserialize;

use crate::errors::SolveError;

/// Threshold below which a divisor is treated as zero.
///
/// Newton-Raphson checks the derivative against this floor before dividing,
/// and the secant method checks the difference of its two most recent
/// function values. Hitting the floor is a first-class terminal condition,
/// not a crash.
pub const DERIVATIVE_FLOOR: f64 = 1e-12;

/// Convergence settings shared by all root-finding methods.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Settings {
    /// Convergence tolerance for the method's error estimate and residual.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration budget; the sole cancellation mechanism of a running solver.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Settings {
    /// Validates that the tolerance is finite and positive and that the
    /// iteration budget is nonzero.
    ///
    /// # Errors
    /// Returns `SolveError::InvalidSettings` naming the offending field.
    pub fn validate(&self) -> Result<(), SolveError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(SolveError::InvalidSettings(
                "tolerance must be finite and positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(SolveError::InvalidSettings(
                "max_iterations must be nonzero",
            ));
        }
        Ok(())
    }
}

pub(crate) fn default_tolerance() -> f64 {
    1e-6
}

pub(crate) fn default_max_iterations() -> usize {
    100
}
