//! Bounded optimization of a scalar objective.
//!
//! An [`OptimizationProblem`] turns solver variables `x: [f64; N]` into a
//! model input and reads a scalar objective back from the model output.
//!
//! - [`golden_section`] — derivative-free search of a bracket for a unimodal
//!   objective

pub mod golden_section;

use modsim_core::{Model, OptimizationProblem, Snapshot};

use crate::trial;

pub use crate::trial::EvalError;

/// One trial of an optimization problem.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub objective: f64,
    pub snapshot: Snapshot<I, O>,
}

/// Result of [`evaluate`] for a given model and problem.
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as OptimizationProblem<N>>::Error>,
>;

/// Evaluates the objective of `problem` at `x`.
///
/// # Errors
///
/// Returns [`EvalError::Problem`] if the input or objective cannot be built,
/// and [`EvalError::Model`] if the model call fails.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: OptimizationProblem<N, Input = M::Input, Output = M::Output>,
{
    let (objective, snapshot) = trial::run(
        model,
        || problem.input(&x),
        |input, output| problem.objective(input, output),
    )?;
    Ok(Evaluation {
        x,
        objective,
        snapshot,
    })
}
