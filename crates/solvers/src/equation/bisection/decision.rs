use super::{Action, Error, Sign};

/// What the solver does with one evaluation.
#[derive(Debug)]
pub(super) enum Decision {
    Continue(Sign),
    StopEarly,
    Error(Error),
}

impl Decision {
    /// Combines the observer's action with the residual outcome.
    ///
    /// An observer action always wins over the residual.
    pub(super) fn new(action: Option<Action>, residual: Result<f64, Error>) -> Self {
        match action {
            Some(Action::AssumeResidualSign(sign)) => Decision::Continue(sign),
            Some(Action::StopEarly) => Decision::StopEarly,
            None => match residual {
                Ok(value) => Decision::Continue(Sign::of(value)),
                Err(error) => Decision::Error(error),
            },
        }
    }
}
