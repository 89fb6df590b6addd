//! Fixed-step forward Euler driver.
//!
//! Advances with `y += dt * f(t, y)` and clips the last step to land on the
//! end of the span. Events are located on the straight line between the ends
//! of each step. The method is first order and has no error control, so it
//! is mostly useful for comparison with [`dopri5`](super::dopri5).

use modsim_core::{Observer, OdeProblem, State};
use thiserror::Error;
use tracing::debug;

use super::{
    Action, Error, Failure, Solution, Status, Step, derivative,
    grid::Grid,
    run::{Flow, Linear, Run},
    validate,
};

/// Configuration for the Euler driver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    dt: f64,
    t_eval: Option<Vec<f64>>,
}

/// Errors that can occur when validating an Euler config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dt must be finite and positive")]
    Dt,
}

impl Config {
    /// Creates a config with step size `dt`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dt`] unless `dt` is finite and positive.
    pub fn new(dt: f64) -> Result<Self, ConfigError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(ConfigError::Dt);
        }
        Ok(Self { dt, t_eval: None })
    }

    /// Samples the trajectory at `times` instead of at every step.
    #[must_use]
    pub fn with_t_eval(mut self, times: impl Into<Vec<f64>>) -> Self {
        self.t_eval = Some(times.into());
        self
    }

    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[must_use]
    pub fn t_eval(&self) -> Option<&[f64]> {
        self.t_eval.as_deref()
    }
}

/// Integrates the problem over its time span with fixed steps.
///
/// # Errors
///
/// Returns an [`Error`] if the time span or initial state is not finite, the
/// output grid is invalid, an event function is not finite, or the
/// derivative fails. A state that becomes non-finite is reported as
/// [`Failure::NonFiniteState`].
pub fn solve<P, Obs>(
    problem: &P,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<P::State>, Error>
where
    P: OdeProblem,
    Obs: Observer<Step<P::State>, Action>,
{
    validate(problem)?;

    let span = problem.time_span();
    let direction = span.direction();
    let grid = config
        .t_eval()
        .map(|times| Grid::new(times, span))
        .transpose()?;

    let dim = P::State::dim();
    let mut t = span.start;
    let mut y = problem.initial_state().to_vec();
    let mut run = Run::start(problem.events(), direction, t, &y, grid)?;

    debug!(
        start = span.start,
        end = span.end,
        dt = config.dt(),
        "starting euler run"
    );

    let mut slope = vec![0.0; dim];
    let mut y_new = vec![0.0; dim];

    while t != span.end {
        let t_new = if config.dt() >= (span.end - t).abs() {
            span.end
        } else {
            t + direction * config.dt()
        };
        let h = t_new - t;

        derivative(problem, t, &y, &mut slope)?;
        run.stats.evaluations += 1;
        for ((out, y), f) in y_new.iter_mut().zip(&y).zip(&slope) {
            *out = y + h * f;
        }

        if y_new.iter().any(|v| !v.is_finite()) {
            return Ok(run.finish(Status::Failed(Failure::NonFiniteState { t: t_new })));
        }

        run.stats.accepted += 1;
        let line = Linear {
            t0: t,
            t1: t_new,
            y0: &y,
            y1: &y_new,
        };
        let flow = run.accept(t, t_new, &y_new, &line)?;

        t = t_new;
        y.copy_from_slice(&y_new);

        if let Flow::Stop(status) = flow {
            return Ok(run.finish(status));
        }
        if let Flow::Stop(status) = run.notify(&mut observer, t, &y) {
            return Ok(run.finish(status));
        }
    }

    Ok(run.finish(Status::Completed))
}

/// Integrates the problem without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<P: OdeProblem>(
    problem: &P,
    config: &Config,
) -> Result<Solution<P::State>, Error> {
    solve(problem, config, ())
}
