use thiserror::Error;

/// Configuration for the Dormand–Prince driver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    rtol: f64,
    atol: f64,
    max_steps: usize,
    max_step: Option<f64>,
    first_step: Option<f64>,
    t_eval: Option<Vec<f64>>,
}

/// Errors that can occur when validating a Dormand–Prince config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rtol must be finite and non-negative")]
    Rtol,

    #[error("atol must be finite and non-negative")]
    Atol,

    #[error("rtol and atol cannot both be zero")]
    ZeroTolerance,

    #[error("max_steps must be at least 1")]
    MaxSteps,

    #[error("max_step must be finite and positive")]
    MaxStep,

    #[error("first_step must be finite and positive")]
    FirstStep,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-6, 1e-9, 100_000).unwrap()
    }
}

impl Config {
    /// Creates a config with validated tolerances and step limit.
    ///
    /// A step is accepted when the RMS of its local error, scaled per
    /// component by `atol + rtol * max(|y_old|, |y_new|)`, is at most one.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite, if both
    /// tolerances are zero, or if `max_steps` is zero.
    pub fn new(rtol: f64, atol: f64, max_steps: usize) -> Result<Self, ConfigError> {
        if !rtol.is_finite() || rtol < 0.0 {
            return Err(ConfigError::Rtol);
        }
        if !atol.is_finite() || atol < 0.0 {
            return Err(ConfigError::Atol);
        }
        if rtol == 0.0 && atol == 0.0 {
            return Err(ConfigError::ZeroTolerance);
        }
        if max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }

        Ok(Self {
            rtol,
            atol,
            max_steps,
            max_step: None,
            first_step: None,
            t_eval: None,
        })
    }

    /// Bounds the magnitude of every step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MaxStep`] unless `max_step` is finite and positive.
    pub fn with_max_step(mut self, max_step: f64) -> Result<Self, ConfigError> {
        if !max_step.is_finite() || max_step <= 0.0 {
            return Err(ConfigError::MaxStep);
        }
        self.max_step = Some(max_step);
        Ok(self)
    }

    /// Uses `first_step` instead of estimating the initial step size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FirstStep`] unless `first_step` is finite and positive.
    pub fn with_first_step(mut self, first_step: f64) -> Result<Self, ConfigError> {
        if !first_step.is_finite() || first_step <= 0.0 {
            return Err(ConfigError::FirstStep);
        }
        self.first_step = Some(first_step);
        Ok(self)
    }

    /// Samples the trajectory at `times` instead of at every accepted step.
    ///
    /// The times are checked against the problem's time span when a run
    /// starts.
    #[must_use]
    pub fn with_t_eval(mut self, times: impl Into<Vec<f64>>) -> Self {
        self.t_eval = Some(times.into());
        self
    }

    #[must_use]
    pub fn rtol(&self) -> f64 {
        self.rtol
    }

    #[must_use]
    pub fn atol(&self) -> f64 {
        self.atol
    }

    /// Returns the maximum number of accepted steps.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    #[must_use]
    pub fn max_step(&self) -> Option<f64> {
        self.max_step
    }

    #[must_use]
    pub fn first_step(&self) -> Option<f64> {
        self.first_step
    }

    /// Returns the requested output times, if any.
    #[must_use]
    pub fn t_eval(&self) -> Option<&[f64]> {
        self.t_eval.as_deref()
    }
}
