use crate::equation::Evaluation;

use super::{Error, Solution, Status};

/// The evaluation with the smallest finite residual magnitude so far.
pub(super) struct Best<I, O> {
    eval: Option<Evaluation<I, O, 1>>,
}

impl<I, O> Best<I, O> {
    pub(super) fn empty() -> Self {
        Self { eval: None }
    }

    /// Keeps `eval` if its residual is finite and strictly smaller in magnitude.
    pub(super) fn update(&mut self, eval: Evaluation<I, O, 1>) {
        let residual = eval.residuals[0].abs();
        if !residual.is_finite() {
            return;
        }
        if let Some(best) = self.eval.as_ref()
            && residual >= best.residuals[0].abs()
        {
            return;
        }
        self.eval = Some(eval);
    }

    pub(super) fn is_residual_converged(&self, residual_tol: f64) -> bool {
        self.eval
            .as_ref()
            .is_some_and(|eval| eval.residuals[0].abs() <= residual_tol)
    }

    /// Builds the solution from the kept evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuccessfulEvaluation`] if nothing was kept.
    pub(super) fn finish(self, status: Status, iters: usize) -> Result<Solution<I, O>, Error> {
        let eval = self.eval.ok_or(Error::NoSuccessfulEvaluation)?;
        Ok(Solution {
            status,
            x: eval.x[0],
            residual: eval.residuals[0],
            snapshot: eval.snapshot,
            iters,
        })
    }
}
