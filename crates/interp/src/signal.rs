use std::fmt;

use modsim_core::Model;
use ndarray::Array1;
use ninterp::prelude::{Interp1DOwned, Interpolator};

use crate::{
    error::InterpError, extrapolate::Extrapolate, polynomial::Barycentric, spline::NaturalSpline,
};

/// How a signal fills the gaps between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// Straight lines between neighboring samples.
    #[default]
    Linear,
    /// The value of the closest sample.
    Nearest,
    /// The value of the latest sample at or before the query (a step signal).
    Previous,
    /// The value of the earliest sample at or after the query.
    Next,
    /// A natural cubic spline.
    CubicSpline,
    /// The single polynomial through every sample.
    ///
    /// Oscillates badly between many unevenly spaced samples; prefer
    /// [`CubicSpline`](Kind::CubicSpline) unless the data is known to be
    /// polynomial.
    Polynomial,
}

impl Kind {
    /// Returns the fewest samples this kind can be built from.
    #[must_use]
    pub fn min_samples(self) -> usize {
        match self {
            Kind::Polynomial => 1,
            _ => 2,
        }
    }
}

macro_rules! define_sampled {
    ($($variant:ident => $strategy:path),+ $(,)?) => {
        /// Kinds backed by `ninterp`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Strategy {
            $($variant),+
        }

        enum Sampled {
            $($variant(Interp1DOwned<f64, $strategy>)),+
        }

        impl Sampled {
            fn new(
                strategy: Strategy,
                times: Vec<f64>,
                values: Vec<f64>,
                extrapolate: Extrapolate<f64>,
            ) -> Result<Self, InterpError> {
                let (x, f_x) = (Array1::from(times), Array1::from(values));
                match strategy {
                    $(Strategy::$variant => Ok(Self::$variant(
                        Interp1DOwned::new(x, f_x, $strategy, extrapolate.into())?
                    )),)+
                }
            }

            fn at(&self, t: f64) -> Result<f64, InterpError> {
                match self {
                    $(Self::$variant(i) => i.interpolate(&[t]).map_err(Into::into),)+
                }
            }
        }
    };
}

define_sampled!(
    Linear => ninterp::strategy::Linear,
    Nearest => ninterp::strategy::Nearest,
    Previous => ninterp::strategy::LeftNearest,
    Next => ninterp::strategy::RightNearest,
);

enum Inner {
    Sampled(Sampled),
    Spline(NaturalSpline),
    Polynomial(Barycentric),
}

/// A sampled external signal, callable at any time.
///
/// # Example
///
/// ```
/// use modsim_interp::{Extrapolate, Kind, Signal};
///
/// let times = [0.0, 10.0, 20.0];
/// let insulin = Signal::new(times, [11.0, 91.0, 49.0], Kind::Linear, Extrapolate::Error)?;
///
/// assert_eq!(insulin.at(5.0)?, 51.0);
/// assert!(insulin.at(25.0).is_err());
/// # Ok::<(), modsim_interp::InterpError>(())
/// ```
pub struct Signal {
    inner: Inner,
    kind: Kind,
    extrapolate: Extrapolate<f64>,
    start: f64,
    end: f64,
}

impl Signal {
    /// Builds a signal from samples.
    ///
    /// # Errors
    ///
    /// Returns an error if `times` and `values` differ in length, there are
    /// fewer samples than [`Kind::min_samples`], a sample is not finite, or the
    /// times are not strictly increasing.
    pub fn new(
        times: impl Into<Vec<f64>>,
        values: impl Into<Vec<f64>>,
        kind: Kind,
        extrapolate: Extrapolate<f64>,
    ) -> Result<Self, InterpError> {
        let (times, values) = (times.into(), values.into());
        validate(&times, &values, kind)?;

        let start = times[0];
        let end = times[times.len() - 1];

        // The nearest sample beyond either end is the end sample itself.
        let hold = match extrapolate {
            Extrapolate::Enable => Extrapolate::Clamp,
            other => other,
        };

        let inner = match kind {
            Kind::Linear => {
                Inner::Sampled(Sampled::new(Strategy::Linear, times, values, extrapolate)?)
            }
            Kind::Nearest => Inner::Sampled(Sampled::new(Strategy::Nearest, times, values, hold)?),
            Kind::Previous => {
                Inner::Sampled(Sampled::new(Strategy::Previous, times, values, hold)?)
            }
            Kind::Next => Inner::Sampled(Sampled::new(Strategy::Next, times, values, hold)?),
            Kind::CubicSpline => Inner::Spline(NaturalSpline::new(times, values)),
            Kind::Polynomial => Inner::Polynomial(Barycentric::new(times, values)),
        };

        Ok(Self {
            inner,
            kind,
            extrapolate,
            start,
            end,
        })
    }

    /// Builds a linear signal that rejects queries outside its samples.
    ///
    /// # Errors
    ///
    /// See [`Signal::new`].
    pub fn linear(
        times: impl Into<Vec<f64>>,
        values: impl Into<Vec<f64>>,
    ) -> Result<Self, InterpError> {
        Self::new(times, values, Kind::Linear, Extrapolate::Error)
    }

    /// Evaluates the signal at `t`.
    ///
    /// # Errors
    ///
    /// Returns [`InterpError::OutOfBounds`] if `t` is outside the sampled
    /// range and extrapolation is [`Extrapolate::Error`], and
    /// [`InterpError::NanQuery`] if `t` is NaN.
    pub fn at(&self, t: f64) -> Result<f64, InterpError> {
        if t.is_nan() {
            return Err(InterpError::NanQuery);
        }

        let inside = (self.start..=self.end).contains(&t);
        if !inside && self.extrapolate == Extrapolate::Error {
            return Err(InterpError::OutOfBounds {
                t,
                start: self.start,
                end: self.end,
            });
        }

        match &self.inner {
            Inner::Sampled(sampled) => sampled.at(t),
            Inner::Spline(spline) => Ok(self.extend(t, |t| spline.at(t))),
            Inner::Polynomial(poly) => Ok(self.extend(t, |t| poly.at(t))),
        }
    }

    /// Evaluates the signal at each of `ts`.
    ///
    /// # Errors
    ///
    /// Returns the first error [`Signal::at`] reports.
    pub fn at_many(&self, ts: &[f64]) -> Result<Vec<f64>, InterpError> {
        ts.iter().map(|&t| self.at(t)).collect()
    }

    /// Returns the first and last sample times.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn extrapolate(&self) -> Extrapolate<f64> {
        self.extrapolate
    }

    /// Applies the extrapolation rule around an in-crate evaluator.
    fn extend(&self, t: f64, eval: impl Fn(f64) -> f64) -> f64 {
        if (self.start..=self.end).contains(&t) {
            return eval(t);
        }
        match self.extrapolate {
            Extrapolate::Enable | Extrapolate::Error => eval(t),
            Extrapolate::Fill(value) => value,
            Extrapolate::Clamp => eval(t.clamp(self.start, self.end)),
            Extrapolate::Wrap => eval(self.wrap(t)),
        }
    }

    fn wrap(&self, t: f64) -> f64 {
        let period = self.end - self.start;
        if period > 0.0 {
            self.start + (t - self.start).rem_euclid(period)
        } else {
            self.start
        }
    }
}

impl Model for Signal {
    type Input = f64;
    type Output = f64;
    type Error = InterpError;

    fn call(&self, t: &f64) -> Result<f64, Self::Error> {
        self.at(*t)
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("kind", &self.kind)
            .field("extrapolate", &self.extrapolate)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

fn validate(times: &[f64], values: &[f64], kind: Kind) -> Result<(), InterpError> {
    if times.len() != values.len() {
        return Err(InterpError::LengthMismatch {
            times: times.len(),
            values: values.len(),
        });
    }

    let needed = kind.min_samples();
    if times.len() < needed {
        return Err(InterpError::TooFewSamples {
            kind,
            needed,
            got: times.len(),
        });
    }

    let non_finite = |v: &f64| !v.is_finite();
    if let Some(index) = times.iter().position(non_finite) {
        return Err(InterpError::NonFiniteTime { index });
    }
    if let Some(index) = values.iter().position(non_finite) {
        return Err(InterpError::NonFiniteValue { index });
    }

    if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
        return Err(InterpError::NotIncreasing { index: index + 1 });
    }

    Ok(())
}
