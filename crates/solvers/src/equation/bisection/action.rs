use super::bracket::Sign;

/// Control actions supported by the bisection solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and return the best evaluation found so far.
    StopEarly,

    /// Shrink the bracket as if the residual had this sign.
    ///
    /// Works on failed evaluations too, which makes it the recovery path for
    /// a model that cannot be evaluated in part of the bracket. An evaluation
    /// that succeeded but was overridden is not kept as a candidate solution.
    AssumeResidualSign(Sign),
}

impl Action {
    /// Treats the residual as positive.
    #[must_use]
    pub fn assume_positive() -> Self {
        Self::AssumeResidualSign(Sign::Positive)
    }

    /// Treats the residual as negative.
    #[must_use]
    pub fn assume_negative() -> Self {
        Self::AssumeResidualSign(Sign::Negative)
    }
}
