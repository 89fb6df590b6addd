use thiserror::Error;

/// Stopping rules for a golden section search.
///
/// The search has converged once its two interior points are within
/// `x_abs_tol + x_rel_tol * |midpoint|` of each other. Each iteration shrinks
/// the bracket by the golden ratio, so about 60 iterations take a unit
/// bracket to `1e-12`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
    x_rel_tol: f64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iters must be at least one")]
    MaxIters,

    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("x_rel_tol must be finite and non-negative")]
    XRel,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(100, 1e-12, 1e-12).unwrap()
    }
}

impl Config {
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero or a tolerance is negative or
    /// not finite.
    pub fn new(max_iters: usize, x_abs_tol: f64, x_rel_tol: f64) -> Result<Self, ConfigError> {
        let valid = |tol: f64| tol.is_finite() && tol >= 0.0;
        if max_iters == 0 {
            Err(ConfigError::MaxIters)
        } else if !valid(x_abs_tol) {
            Err(ConfigError::XAbs)
        } else if !valid(x_rel_tol) {
            Err(ConfigError::XRel)
        } else {
            Ok(Self {
                max_iters,
                x_abs_tol,
                x_rel_tol,
            })
        }
    }

    /// Returns `self` with a different iteration limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MaxIters`] if `max_iters` is zero.
    pub fn with_max_iters(self, max_iters: usize) -> Result<Self, ConfigError> {
        Self::new(max_iters, self.x_abs_tol, self.x_rel_tol)
    }

    /// Returns the maximum number of bracket reductions.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    #[must_use]
    pub fn x_rel_tol(&self) -> f64 {
        self.x_rel_tol
    }
}
