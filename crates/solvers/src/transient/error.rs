use std::error::Error as StdError;

use thiserror::Error;

/// Errors that prevent a transient run from producing a solution.
///
/// Integration failures such as step size underflow are not errors; they are
/// reported through [`Status::Failed`](super::Status::Failed).
#[derive(Debug, Error)]
pub enum Error {
    #[error("time span must be finite, got [{start}, {end}]")]
    InvalidTimeSpan { start: f64, end: f64 },

    #[error("initial state contains a non-finite value")]
    NonFiniteInitialState,

    #[error("invalid output grid: {reason}")]
    InvalidGrid { reason: &'static str },

    #[error("event `{name}` is not finite at t = {t}")]
    NonFiniteEvent { name: &'static str, t: f64 },

    #[error("derivative failed")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}
