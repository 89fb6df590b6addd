//! Golden section search for single-variable optimization.
//!
//! # Algorithm
//!
//! Golden section search finds the minimum (or maximum) of a unimodal function
//! on a bounded interval. Two interior points split the bracket in the golden
//! ratio; each iteration drops the part of the bracket beyond the worse of
//! the two and reuses the better one as an interior point of the smaller
//! bracket, so every iteration costs one evaluation.
//!
//! The search only ever evaluates inside the inclusive bounds. If it converges
//! against an end of the bracket that never moved, the bound itself is
//! evaluated once and reported with [`Status::ConvergedAtBound`] when it is at
//! least as good as the interior points.
//!
//! # Limitations
//!
//! - Works with [`OptimizationProblem<1>`] only
//! - A function with several extrema on the bracket may yield a local one
//!
//! # Observer Events
//!
//! Every evaluation is reported as an [`Event`]:
//!
//! - [`Event::Evaluated`] — evaluation succeeded
//! - [`Event::ModelFailed`] — model returned an error
//! - [`Event::ProblemFailed`] — problem returned an error (input or objective)
//!
//! Observers can return [`Action::StopEarly`] to halt immediately, or
//! [`Action::AssumeWorse`] to score the point as worse than any other.

mod action;
mod bracket;
mod config;
mod error;
mod event;
mod solution;
mod state;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::{Event, Point};
pub use solution::{Bound, Solution, Status};

use modsim_core::{Model, Observer, OptimizationProblem};

use crate::optimization::{EvalError, Evaluation, evaluate};

use bracket::GoldenBracket;
use state::Best;

/// Finds the minimum of the objective using golden section search.
///
/// The bounds may be given in either order.
///
/// # Errors
///
/// Returns [`Error::InvalidBracket`] for non-finite or equal bounds, and a
/// model or problem error if an evaluation fails and the observer does not
/// return [`Action::AssumeWorse`] to recover.
pub fn minimize<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    search(model, problem, bracket, config, observer, |v| v)
}

/// Finds the minimum of the objective without observation.
///
/// # Errors
///
/// See [`minimize`].
pub fn minimize_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    minimize(model, problem, bracket, config, ())
}

/// Finds the maximum of the objective using golden section search.
///
/// # Errors
///
/// See [`minimize`].
pub fn maximize<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    search(model, problem, bracket, config, observer, |v| -v)
}

/// Finds the maximum of the objective without observation.
///
/// # Errors
///
/// See [`minimize`].
pub fn maximize_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    maximize(model, problem, bracket, config, ())
}

/// Shared search loop.
///
/// `score` maps an objective to a value where lower is better: identity for
/// minimization, negation for maximization.
fn search<M, P, Obs, F>(
    model: &M,
    problem: &P,
    bounds: [f64; 2],
    config: &Config,
    mut observer: Obs,
    score: F,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
    F: Fn(f64) -> f64,
{
    let mut bracket = GoldenBracket::new(bounds)?;
    let mut best = Best::empty();

    // Evaluates `x` and returns its score, or `None` if the observer stopped.
    let mut visit = |best: &mut Best<M::Input, M::Output>, x: f64| -> Result<Option<f64>, Error> {
        let outcome = probe(model, problem, &mut observer, best.point(), x, &score)?;
        Ok(match outcome {
            Probe::Kept(eval, value) => {
                best.offer(eval, value);
                Some(value)
            }
            Probe::Worse => Some(f64::INFINITY),
            Probe::Stop => None,
        })
    };

    let Some(mut left_score) = visit(&mut best, bracket.inner_left)? else {
        return best.finish(Status::StoppedByObserver, 0);
    };
    let Some(mut right_score) = visit(&mut best, bracket.inner_right)? else {
        return best.finish(Status::StoppedByObserver, 0);
    };

    for iter in 1..=config.max_iters() {
        if bracket.is_converged(config.x_abs_tol(), config.x_rel_tol()) {
            return finish_converged(model, problem, &mut observer, bracket, best, &score, iter - 1);
        }

        if left_score <= right_score {
            let x = bracket.shrink_right();
            let Some(value) = visit(&mut best, x)? else {
                return best.finish(Status::StoppedByObserver, iter);
            };
            right_score = left_score;
            left_score = value;
        } else {
            let x = bracket.shrink_left();
            let Some(value) = visit(&mut best, x)? else {
                return best.finish(Status::StoppedByObserver, iter);
            };
            left_score = right_score;
            right_score = value;
        }
    }

    if bracket.is_converged(config.x_abs_tol(), config.x_rel_tol()) {
        let iters = config.max_iters();
        return finish_converged(model, problem, &mut observer, bracket, best, &score, iters);
    }

    best.finish(Status::MaxIters, config.max_iters())
}

/// Checks any bound the bracket is still anchored to, then finishes.
///
/// A bound that fails to evaluate is scored as worse than the interior result.
fn finish_converged<M, P, Obs, F>(
    model: &M,
    problem: &P,
    observer: &mut Obs,
    bracket: GoldenBracket,
    mut best: Best<M::Input, M::Output>,
    score: &F,
    iters: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
    F: Fn(f64) -> f64,
{
    let mut status = Status::Converged;

    let anchored: Vec<_> = bracket.anchored().collect();
    for (bound, x) in anchored {
        let outcome = match probe(model, problem, observer, best.point(), x, score) {
            Err(Error::Model(_) | Error::Problem(_)) if best.score().is_some() => Probe::Worse,
            result => result?,
        };
        match outcome {
            Probe::Kept(eval, value) => {
                if best.score().is_none_or(|current| value <= current) {
                    best.replace(eval, value);
                    status = Status::ConvergedAtBound(bound);
                }
            }
            Probe::Worse => {}
            Probe::Stop => return best.finish(Status::StoppedByObserver, iters),
        }
    }

    best.finish(status, iters)
}

/// What one evaluation contributes to the search.
enum Probe<I, O> {
    /// A successful evaluation and its score.
    Kept(Evaluation<I, O, 1>, f64),
    /// Failed or overridden by the observer; scores as worse than anything.
    Worse,
    Stop,
}

/// Evaluates `x`, reports it to the observer, and applies the observer's action.
fn probe<M, P, Obs, F>(
    model: &M,
    problem: &P,
    observer: &mut Obs,
    best: Option<Point>,
    x: f64,
    score: &F,
) -> Result<Probe<M::Input, M::Output>, Error>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
    F: Fn(f64) -> f64,
{
    match evaluate(model, problem, [x]) {
        Ok(eval) => {
            let event: Event<'_, M, P> = Event::Evaluated {
                point: Point::from(&eval),
                input: &eval.snapshot.input,
                output: &eval.snapshot.output,
                best,
            };
            match observer.observe(&event) {
                Some(Action::StopEarly) => Ok(Probe::Stop),
                Some(Action::AssumeWorse) => Ok(Probe::Worse),
                None if eval.objective.is_nan() => Err(Error::NanObjective { x }),
                None => {
                    let value = score(eval.objective);
                    Ok(Probe::Kept(eval, value))
                }
            }
        }
        Err(error) => {
            let event: Event<'_, M, P> = match &error {
                EvalError::Model(e) => Event::ModelFailed { x, best, error: e },
                EvalError::Problem(e) => Event::ProblemFailed { x, best, error: e },
            };
            match observer.observe(&event) {
                Some(Action::StopEarly) => Ok(Probe::Stop),
                Some(Action::AssumeWorse) => Ok(Probe::Worse),
                None => Err(error.into()),
            }
        }
    }
}
