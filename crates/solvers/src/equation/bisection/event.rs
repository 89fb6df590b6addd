use modsim_core::{EquationProblem, Model};

use crate::equation::EvaluateResult;

use super::Bracket;

/// An evaluation reported by the bisection solver.
pub enum Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// Evaluation of the lower endpoint.
    Left {
        x: f64,
        result: &'a EvaluateResult<M, P, 1>,
    },

    /// Evaluation of the upper endpoint.
    Right {
        x: f64,
        result: &'a EvaluateResult<M, P, 1>,
    },

    /// Evaluation of the midpoint of `bracket`.
    Midpoint {
        x: f64,
        bracket: &'a Bracket,
        result: &'a EvaluateResult<M, P, 1>,
    },
}

impl<'a, M, P> Event<'a, M, P>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Event::Left { x, .. } | Event::Right { x, .. } | Event::Midpoint { x, .. } => *x,
        }
    }

    pub fn result(&self) -> &'a EvaluateResult<M, P, 1> {
        match self {
            Event::Left { result, .. }
            | Event::Right { result, .. }
            | Event::Midpoint { result, .. } => *result,
        }
    }

    /// Returns the residual, or `None` if the evaluation failed.
    #[must_use]
    pub fn residual(&self) -> Option<f64> {
        self.result().as_ref().ok().map(|eval| eval.residuals[0])
    }
}
