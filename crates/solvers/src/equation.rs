//! Root finding for equation problems.
//!
//! An [`EquationProblem`] turns solver variables `x: [f64; N]` into a model
//! input and reads residuals back from the model output. The solvers here
//! search for an `x` whose residuals are zero.
//!
//! - [`bisection`] — halves a sign-changing bracket until it is narrow enough

pub mod bisection;

use modsim_core::{EquationProblem, Model, Snapshot};

use crate::trial;

pub use crate::trial::EvalError;

/// One trial of an equation problem: the solver variables, the residuals they
/// produced, and the model call behind them.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
}

/// Result of [`evaluate`] for a given model and problem.
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Evaluates the residuals of `problem` at `x`.
///
/// # Errors
///
/// Returns [`EvalError::Problem`] if the input or residuals cannot be built,
/// and [`EvalError::Model`] if the model call fails.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let (residuals, snapshot) = trial::run(
        model,
        || problem.input(&x),
        |input, output| problem.residuals(input, output),
    )?;
    Ok(Evaluation {
        x,
        residuals,
        snapshot,
    })
}
