//! Calibration of a simulation parameter by repeated runs.
//!
//! A calibration treats "build a parameter record from a trial value, run the
//! simulation, and read one number off the result" as a scalar function of
//! the trial value. [`Simulate`] adapts the [`dopri5`] driver to a
//! [`Model`], and [`Calibration`] implements both [`OptimizationProblem<1>`]
//! and [`EquationProblem<1>`] on top of it, so the calibration can be handed
//! to [`golden_section`] or [`bisection`] like any other problem.
//!
//! Every evaluation builds a fresh record from a shared base and runs an
//! independent simulation. The base record is only ever borrowed.

use std::marker::PhantomData;

use modsim_core::{EquationProblem, Model, OdeProblem, OptimizationProblem};
use thiserror::Error;
use tracing::trace;

use crate::{
    equation::bisection,
    optimization::golden_section,
    transient::{self, Failure, Status, dopri5},
};

type Output<P> = transient::Solution<<P as OdeProblem>::State>;

/// A [`Model`] that runs the Dormand–Prince driver on its input record.
#[derive(Debug, Clone)]
pub struct Simulate<P> {
    config: dopri5::Config,
    _problem: PhantomData<fn() -> P>,
}

impl<P> Simulate<P> {
    #[must_use]
    pub fn new(config: dopri5::Config) -> Self {
        Self {
            config,
            _problem: PhantomData,
        }
    }

    #[must_use]
    pub fn config(&self) -> &dopri5::Config {
        &self.config
    }
}

impl<P> Default for Simulate<P> {
    fn default() -> Self {
        Self::new(dopri5::Config::default())
    }
}

impl<P: OdeProblem> Model for Simulate<P> {
    type Input = P;
    type Output = Output<P>;
    type Error = transient::Error;

    fn call(&self, input: &P) -> Result<Self::Output, Self::Error> {
        dopri5::solve_unobserved(input, &self.config)
    }
}

/// Errors raised while turning a run into an observable value.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    #[error("simulation failed: {0}")]
    RunFailed(Failure),

    #[error("observable is not defined for this run")]
    MissingObservable,
}

/// A scalar calibration problem over a simulation.
///
/// `set` builds a trial record from the base and a trial value; `observe`
/// reads the observable from a finished run, returning `None` when the run
/// does not define it. A failed run is an error, never a value.
pub struct Calibration<P, Set, Obs> {
    base: P,
    set: Set,
    observe: Obs,
    target: f64,
}

impl<P, Set, Obs> Calibration<P, Set, Obs>
where
    P: OdeProblem,
    Set: Fn(&P, f64) -> P,
    Obs: Fn(&Output<P>) -> Option<f64>,
{
    /// Creates a calibration with a target of zero.
    pub fn new(base: P, set: Set, observe: Obs) -> Self {
        Self {
            base,
            set,
            observe,
            target: 0.0,
        }
    }

    /// Sets the value the observable should reach when solving.
    ///
    /// Only root finding uses the target; the residual is
    /// `observable - target`.
    #[must_use]
    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    /// Returns the base record.
    pub fn base(&self) -> &P {
        &self.base
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Builds the trial record for `x`.
    pub fn trial(&self, x: f64) -> P {
        (self.set)(&self.base, x)
    }

    /// Reads the observable from a finished run.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::RunFailed`] for a failed run and
    /// [`CalibrationError::MissingObservable`] if `observe` returns `None`.
    pub fn observable(&self, solution: &Output<P>) -> Result<f64, CalibrationError> {
        if let Status::Failed(failure) = solution.status {
            trace!(%failure, "calibration run failed");
            return Err(CalibrationError::RunFailed(failure));
        }
        let value = (self.observe)(solution).ok_or(CalibrationError::MissingObservable)?;
        trace!(value, accepted = solution.stats.accepted, "calibration run");
        Ok(value)
    }
}

impl<P, Set, Obs> OptimizationProblem<1> for Calibration<P, Set, Obs>
where
    P: OdeProblem,
    Set: Fn(&P, f64) -> P,
    Obs: Fn(&Output<P>) -> Option<f64>,
{
    type Input = P;
    type Output = Output<P>;
    type Error = CalibrationError;

    fn input(&self, x: &[f64; 1]) -> Result<P, Self::Error> {
        trace!(x = x[0], "calibration trial");
        Ok(self.trial(x[0]))
    }

    fn objective(&self, _input: &P, output: &Output<P>) -> Result<f64, Self::Error> {
        self.observable(output)
    }
}

impl<P, Set, Obs> EquationProblem<1> for Calibration<P, Set, Obs>
where
    P: OdeProblem,
    Set: Fn(&P, f64) -> P,
    Obs: Fn(&Output<P>) -> Option<f64>,
{
    type Input = P;
    type Output = Output<P>;
    type Error = CalibrationError;

    fn input(&self, x: &[f64; 1]) -> Result<P, Self::Error> {
        trace!(x = x[0], "calibration trial");
        Ok(self.trial(x[0]))
    }

    fn residuals(&self, _input: &P, output: &Output<P>) -> Result<[f64; 1], Self::Error> {
        Ok([self.observable(output)? - self.target])
    }
}

/// Solver settings for the calibration entry points.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    run: dopri5::Config,
    search: golden_section::Config,
    root: bisection::Config,
}

impl Config {
    /// Uses `run` for every simulation.
    #[must_use]
    pub fn with_run(mut self, run: dopri5::Config) -> Self {
        self.run = run;
        self
    }

    /// Uses `search` for [`maximize`] and [`minimize`].
    #[must_use]
    pub fn with_search(mut self, search: golden_section::Config) -> Self {
        self.search = search;
        self
    }

    /// Uses `root` for [`solve_for`].
    #[must_use]
    pub fn with_root(mut self, root: bisection::Config) -> Self {
        self.root = root;
        self
    }

    #[must_use]
    pub fn run(&self) -> &dopri5::Config {
        &self.run
    }

    #[must_use]
    pub fn search(&self) -> &golden_section::Config {
        &self.search
    }

    #[must_use]
    pub fn root(&self) -> &bisection::Config {
        &self.root
    }
}

/// Finds the trial value in `bounds` that maximizes the observable.
///
/// # Errors
///
/// See [`golden_section::maximize`]. A failed run or missing observable
/// surfaces as [`golden_section::Error::Problem`].
pub fn maximize<P, Set, Obs>(
    calibration: &Calibration<P, Set, Obs>,
    bounds: [f64; 2],
    config: &Config,
) -> Result<golden_section::Solution<P, Output<P>>, golden_section::Error>
where
    P: OdeProblem,
    Set: Fn(&P, f64) -> P,
    Obs: Fn(&Output<P>) -> Option<f64>,
{
    let simulate = Simulate::new(config.run.clone());
    golden_section::maximize_unobserved(&simulate, calibration, bounds, &config.search)
}

/// Finds the trial value in `bounds` that minimizes the observable.
///
/// # Errors
///
/// See [`golden_section::minimize`].
pub fn minimize<P, Set, Obs>(
    calibration: &Calibration<P, Set, Obs>,
    bounds: [f64; 2],
    config: &Config,
) -> Result<golden_section::Solution<P, Output<P>>, golden_section::Error>
where
    P: OdeProblem,
    Set: Fn(&P, f64) -> P,
    Obs: Fn(&Output<P>) -> Option<f64>,
{
    let simulate = Simulate::new(config.run.clone());
    golden_section::minimize_unobserved(&simulate, calibration, bounds, &config.search)
}

/// Finds the trial value in `bracket` where the observable reaches the
/// calibration's target.
///
/// # Errors
///
/// See [`bisection::solve`]. Returns [`bisection::Error::InvalidBracket`] if
/// the observable does not cross the target between the bracket ends.
pub fn solve_for<P, Set, Obs>(
    calibration: &Calibration<P, Set, Obs>,
    bracket: [f64; 2],
    config: &Config,
) -> Result<bisection::Solution<P, Output<P>>, bisection::Error>
where
    P: OdeProblem,
    Set: Fn(&P, f64) -> P,
    Obs: Fn(&Output<P>) -> Option<f64>,
{
    let simulate = Simulate::new(config.run.clone());
    bisection::solve_unobserved(&simulate, calibration, bracket, &config.root)
}
