//! Bisection root finding for single-variable equation problems.
//!
//! The solver evaluates both ends of the supplied bracket, checks that the
//! residual changes sign between them, then repeatedly evaluates the midpoint
//! and keeps the half that still brackets the root.
//!
//! # Observer events
//!
//! Every evaluation is reported as an [`Event`]: [`Event::Left`] and
//! [`Event::Right`] for the two endpoints, then [`Event::Midpoint`] once per
//! iteration. Failed evaluations are reported too, so an observer can recover
//! with [`Action::AssumeResidualSign`] or halt with [`Action::StopEarly`].
//!
//! The reported solution is the evaluation with the smallest residual
//! magnitude seen during the search.

mod action;
mod best;
mod bracket;
mod config;
mod decision;
mod error;
mod event;
mod solution;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use bracket::{Bracket, BracketError, Sign};
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use modsim_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use best::Best;
use bracket::Bounds;
use decision::Decision;

/// Finds a root of the residual inside `bracket`.
///
/// The endpoints may be given in either order.
///
/// # Errors
///
/// Returns [`Error::InvalidBracket`] if the bracket is non-finite, has zero
/// width, or the endpoint residuals share a sign. Returns a model or problem
/// error if an evaluation fails and the observer does not recover from it.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let bounds = Bounds::new(bracket)?;
    let [left, right] = bounds.as_array();
    let mut best = Best::empty();

    let (eval, decision) = probe(model, problem, &mut observer, left, Probe::Left);
    let Some(left_sign) = settle(&mut best, eval, decision)? else {
        return best.finish(Status::StoppedByObserver, 0);
    };
    if best.is_residual_converged(config.residual_tol()) {
        return best.finish(Status::Converged, 0);
    }

    let (eval, decision) = probe(model, problem, &mut observer, right, Probe::Right);
    let Some(right_sign) = settle(&mut best, eval, decision)? else {
        return best.finish(Status::StoppedByObserver, 0);
    };
    if best.is_residual_converged(config.residual_tol()) {
        return best.finish(Status::Converged, 0);
    }

    let mut bracket = Bracket::new(bounds, left_sign, right_sign)?;

    for iter in 1..=config.max_iters() {
        let x = bracket.midpoint();
        let (eval, decision) = probe(model, problem, &mut observer, x, Probe::Midpoint(bracket));
        let Some(sign) = settle(&mut best, eval, decision)? else {
            return best.finish(Status::StoppedByObserver, iter);
        };

        bracket.shrink(x, sign);

        if best.is_residual_converged(config.residual_tol())
            || bracket.is_x_converged(config.x_abs_tol(), config.x_rel_tol())
        {
            return best.finish(Status::Converged, iter);
        }
    }

    best.finish(Status::MaxIters, config.max_iters())
}

/// Finds a root of the residual inside `bracket` without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Which point of the search an evaluation belongs to.
enum Probe {
    Left,
    Right,
    Midpoint(Bracket),
}

type Probed<I, O> = (Option<Evaluation<I, O, 1>>, Decision);

/// Evaluates `x`, reports it to the observer, and decides how to proceed.
///
/// An evaluation whose sign was overridden by the observer is dropped so it
/// never becomes the reported solution.
fn probe<M, P, Obs>(
    model: &M,
    problem: &P,
    observer: &mut Obs,
    x: f64,
    point: Probe,
) -> Probed<M::Input, M::Output>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let result = evaluate(model, problem, [x]);

    let action = {
        let event: Event<'_, M, P> = match &point {
            Probe::Left => Event::Left { x, result: &result },
            Probe::Right => Event::Right { x, result: &result },
            Probe::Midpoint(bracket) => Event::Midpoint {
                x,
                bracket,
                result: &result,
            },
        };
        observer.observe(&event)
    };

    let (residual, eval) = match result {
        Ok(eval) => {
            let residual = eval.residuals[0];
            let checked = if residual.is_finite() {
                Ok(residual)
            } else {
                Err(Error::NonFiniteResidual { x, residual })
            };
            (checked, Some(eval))
        }
        Err(error) => (Err(Error::from(error)), None),
    };

    let decision = Decision::new(action, residual);
    let eval = match action {
        Some(Action::AssumeResidualSign(_)) => None,
        _ => eval,
    };

    (eval, decision)
}

/// Records a usable evaluation and turns the decision into a sign.
///
/// Returns `Ok(None)` when the observer asked to stop.
fn settle<I, O>(
    best: &mut Best<I, O>,
    eval: Option<Evaluation<I, O, 1>>,
    decision: Decision,
) -> Result<Option<Sign>, Error> {
    if let Some(eval) = eval {
        best.update(eval);
    }

    match decision {
        Decision::Continue(sign) => Ok(Some(sign)),
        Decision::StopEarly => Ok(None),
        Decision::Error(error) => Err(error),
    }
}
