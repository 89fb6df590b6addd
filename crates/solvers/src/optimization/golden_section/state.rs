use modsim_core::Snapshot;

use crate::optimization::Evaluation;

use super::{Error, Point, Solution, Status};

/// The best kept evaluation and its score.
///
/// Scores are transformed objectives where lower is always better, so the
/// same tracker serves minimization and maximization.
pub(super) struct Best<I, O> {
    kept: Option<(Point, f64, Snapshot<I, O>)>,
}

impl<I, O> Best<I, O> {
    pub(super) fn empty() -> Self {
        Self { kept: None }
    }

    pub(super) fn point(&self) -> Option<Point> {
        self.kept.as_ref().map(|(point, _, _)| *point)
    }

    pub(super) fn score(&self) -> Option<f64> {
        self.kept.as_ref().map(|(_, score, _)| *score)
    }

    /// Keeps `eval` if its score is strictly lower than the current best.
    pub(super) fn offer(&mut self, eval: Evaluation<I, O, 1>, score: f64) {
        if self.score().is_none_or(|best| score < best) {
            self.replace(eval, score);
        }
    }

    /// Keeps `eval` unconditionally.
    pub(super) fn replace(&mut self, eval: Evaluation<I, O, 1>, score: f64) {
        self.kept = Some((Point::from(&eval), score, eval.snapshot));
    }

    /// Builds the solution from the kept evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuccessfulEvaluation`] if nothing was kept.
    pub(super) fn finish(self, status: Status, iters: usize) -> Result<Solution<I, O>, Error> {
        let (point, _, snapshot) = self.kept.ok_or(Error::NoSuccessfulEvaluation)?;
        Ok(Solution {
            status,
            x: point.x,
            objective: point.objective,
            snapshot,
            iters,
        })
    }
}
