//! Model calls made on behalf of a solver.

use modsim_core::{Model, Snapshot};
use thiserror::Error;

/// Failure of one trial, from either the model or the problem around it.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    #[error("model call failed")]
    Model(#[source] ME),

    #[error("problem error")]
    Problem(#[source] PE),
}

/// Builds an input, calls `model` on it, and scores the call.
///
/// `build` and `score` are the problem's halves of the trial; their errors
/// are reported as [`EvalError::Problem`].
pub(crate) fn run<M, PE, T>(
    model: &M,
    build: impl FnOnce() -> Result<M::Input, PE>,
    score: impl FnOnce(&M::Input, &M::Output) -> Result<T, PE>,
) -> Result<(T, Snapshot<M::Input, M::Output>), EvalError<M::Error, PE>>
where
    M: Model,
{
    let input = build().map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let value = score(&input, &output).map_err(EvalError::Problem)?;
    Ok((value, Snapshot::new(input, output)))
}
