use ninterp::error::{InterpolateError, ValidateError};
use thiserror::Error;

use crate::Kind;

#[derive(Error, Debug)]
pub enum InterpError {
    #[error(transparent)]
    Validation(#[from] ValidateError),

    #[error(transparent)]
    Interpolation(#[from] InterpolateError),

    #[error("got {times} times but {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("{kind:?} interpolation needs at least {needed} samples, got {got}")]
    TooFewSamples {
        kind: Kind,
        needed: usize,
        got: usize,
    },

    #[error("time t[{index}] is not finite")]
    NonFiniteTime { index: usize },

    #[error("value at sample {index} is not finite")]
    NonFiniteValue { index: usize },

    #[error("times must be strictly increasing, but t[{index}] does not exceed the time before it")]
    NotIncreasing { index: usize },

    #[error("t = {t} is outside the sampled range [{start}, {end}]")]
    OutOfBounds { t: f64, start: f64, end: f64 },

    #[error("cannot evaluate a signal at NaN")]
    NanQuery,
}
