use modsim_core::Snapshot;

/// How the bisection solver finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The bracket width or a residual met its tolerance.
    Converged,

    /// The iteration limit was reached first.
    MaxIters,

    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

/// The result of a bisection solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    pub status: Status,

    /// The evaluated x with the smallest residual magnitude.
    pub x: f64,

    pub residual: f64,

    /// Model input and output at `x`.
    pub snapshot: Snapshot<I, O>,

    /// Midpoint iterations performed.
    pub iters: usize,
}
