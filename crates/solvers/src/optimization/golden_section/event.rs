use modsim_core::{Model, OptimizationProblem};

use crate::optimization::Evaluation;

/// A trial `x` and the objective it scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub objective: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, objective: f64) -> Self {
        Self { x, objective }
    }
}

impl<I, O> From<&Evaluation<I, O, 1>> for Point {
    fn from(eval: &Evaluation<I, O, 1>) -> Self {
        Self::new(eval.x[0], eval.objective)
    }
}

/// An evaluation reported by the golden section solver.
///
/// `best` is the best point kept so far, or `None` before the first
/// successful evaluation. Observers can compare against it to decide whether
/// to stop or to steer the search with
/// [`Action::AssumeWorse`](super::Action::AssumeWorse).
pub enum Event<'a, M, P>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// The model and objective were evaluated.
    Evaluated {
        point: Point,
        input: &'a M::Input,
        output: &'a M::Output,
        best: Option<Point>,
    },

    /// The model call failed.
    ModelFailed {
        x: f64,
        best: Option<Point>,
        error: &'a M::Error,
    },

    /// Building the input or computing the objective failed.
    ProblemFailed {
        x: f64,
        best: Option<Point>,
        error: &'a P::Error,
    },
}

impl<M, P> Event<'_, M, P>
where
    M: Model,
    P: OptimizationProblem<1, Input = M::Input, Output = M::Output>,
{
    /// Returns the x that was evaluated or attempted.
    #[must_use]
    pub fn x(&self) -> f64 {
        match self {
            Self::Evaluated { point, .. } => point.x,
            Self::ModelFailed { x, .. } | Self::ProblemFailed { x, .. } => *x,
        }
    }

    /// Returns the objective, or `None` if the evaluation failed.
    #[must_use]
    pub fn objective(&self) -> Option<f64> {
        match self {
            Self::Evaluated { point, .. } => Some(point.objective),
            Self::ModelFailed { .. } | Self::ProblemFailed { .. } => None,
        }
    }

    #[must_use]
    pub fn best(&self) -> Option<Point> {
        match self {
            Self::Evaluated { best, .. }
            | Self::ModelFailed { best, .. }
            | Self::ProblemFailed { best, .. } => *best,
        }
    }
}
