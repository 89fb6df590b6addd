use std::convert::Infallible;

use modsim_core::{Direction, Event, OdeProblem, State, TimeSpan};

/// Population size (billions).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub p: f64,
}

impl State for Size {
    const NAMES: &'static [&'static str] = &["p"];

    fn write_to(&self, out: &mut [f64]) {
        out[0] = self.p;
    }

    fn from_slice(values: &[f64]) -> Self {
        Self { p: values[0] }
    }
}

/// Logistic growth `p' = r p (1 - p / capacity)`.
///
/// With a threshold set, every upward crossing of it is recorded as a
/// `threshold` event without stopping the run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    pub p0: f64,
    /// Net growth rate (1/year).
    pub r: f64,
    /// Carrying capacity.
    pub capacity: f64,
    pub threshold: Option<f64>,
    pub start: f64,
    pub end: f64,
}

impl Population {
    /// World population from 1950 to 2016.
    #[must_use]
    pub fn world() -> Self {
        Self {
            p0: 2.557,
            r: 0.025,
            capacity: 13.9,
            threshold: None,
            start: 1950.0,
            end: 2016.0,
        }
    }

    /// Returns `self` recording crossings of `threshold`, keeping other fields unchanged.
    #[must_use]
    pub fn with_threshold(self, threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
            ..self
        }
    }

    /// Returns the closed-form solution at `t`.
    #[must_use]
    pub fn exact(&self, t: f64) -> f64 {
        let decay = (-self.r * (t - self.start)).exp();
        self.capacity / (1.0 + (self.capacity / self.p0 - 1.0) * decay)
    }
}

impl OdeProblem for Population {
    type State = Size;
    type Error = Infallible;

    fn initial_state(&self) -> Size {
        Size { p: self.p0 }
    }

    fn time_span(&self) -> TimeSpan {
        TimeSpan::new(self.start, self.end)
    }

    fn derivative(&self, _t: f64, state: &Size) -> Result<Size, Self::Error> {
        Ok(Size {
            p: self.r * state.p * (1.0 - state.p / self.capacity),
        })
    }

    fn events(&self) -> Vec<Event<'_, Size>> {
        self.threshold
            .map(|level| {
                Event::recorded("threshold", Direction::Rising, move |_t, s: &Size| {
                    s.p - level
                })
            })
            .into_iter()
            .collect()
    }
}
