use modsim_core::Snapshot;

/// Which original bound the optimum was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bound {
    Lower,
    Upper,
}

/// How the golden section search finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The interior points met the x tolerance.
    Converged,

    /// Converged against an end of the bracket that never moved, and the
    /// bound itself scored at least as well as any interior point.
    ConvergedAtBound(Bound),

    /// The iteration limit was reached first.
    MaxIters,

    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

impl Status {
    /// Returns true for [`Status::Converged`] and [`Status::ConvergedAtBound`].
    #[must_use]
    pub fn is_converged(&self) -> bool {
        matches!(self, Status::Converged | Status::ConvergedAtBound(_))
    }
}

/// The result of a golden section search.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,

    /// The best evaluated x.
    pub x: f64,

    /// Objective at `x`, untransformed.
    pub objective: f64,

    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Bracket reductions performed.
    pub iters: usize,
}
