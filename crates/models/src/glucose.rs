use modsim_core::{OdeProblem, State, TimeSpan};
use modsim_interp::{InterpError, Signal};

/// Plasma glucose and remote insulin action.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glucose {
    /// Plasma glucose concentration (mg/dL).
    pub glucose: f64,
    /// Insulin action in the remote compartment (1/min).
    pub insulin_action: f64,
}

impl State for Glucose {
    const NAMES: &'static [&'static str] = &["glucose", "insulin_action"];

    fn write_to(&self, out: &mut [f64]) {
        out[0] = self.glucose;
        out[1] = self.insulin_action;
    }

    fn from_slice(values: &[f64]) -> Self {
        Self {
            glucose: values[0],
            insulin_action: values[1],
        }
    }
}

/// The Bergman minimal model of glucose and insulin kinetics.
///
/// ```text
/// G' = -k1 (G - Gb) - X G
/// X' = k3 (I(t) - Ib) - k2 X
/// ```
///
/// Plasma insulin `I(t)` is measured data supplied as a [`Signal`]. The
/// derivative fails if the signal cannot be evaluated, for example when the
/// run extends past the sampled range.
#[derive(Debug, Clone, Copy)]
pub struct GlucoseInsulin<'a> {
    /// Initial glucose (mg/dL).
    pub g0: f64,
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
    /// Basal glucose (mg/dL).
    pub gb: f64,
    /// Basal insulin (μU/mL).
    pub ib: f64,
    pub insulin: &'a Signal,
    /// End of the run (min).
    pub end: f64,
}

impl<'a> GlucoseInsulin<'a> {
    /// Creates the model with typical fitted parameters, running over the
    /// signal's whole domain.
    #[must_use]
    pub fn new(insulin: &'a Signal) -> Self {
        let (_, end) = insulin.domain();
        Self {
            g0: 270.0,
            k1: 0.02,
            k2: 0.02,
            k3: 1.5e-5,
            gb: 92.0,
            ib: 11.0,
            insulin,
            end,
        }
    }

    /// Returns `self` with the given rate constants, keeping other fields unchanged.
    #[must_use]
    pub fn with_rates(self, k1: f64, k2: f64, k3: f64) -> Self {
        Self {
            k1,
            k2,
            k3,
            ..self
        }
    }
}

impl OdeProblem for GlucoseInsulin<'_> {
    type State = Glucose;
    type Error = InterpError;

    fn initial_state(&self) -> Glucose {
        Glucose {
            glucose: self.g0,
            insulin_action: 0.0,
        }
    }

    fn time_span(&self) -> TimeSpan {
        TimeSpan::new(0.0, self.end)
    }

    fn derivative(&self, t: f64, state: &Glucose) -> Result<Glucose, Self::Error> {
        let insulin = self.insulin.at(t)?;
        let Glucose {
            glucose: g,
            insulin_action: x,
        } = *state;

        Ok(Glucose {
            glucose: -self.k1 * (g - self.gb) - x * g,
            insulin_action: self.k3 * (insulin - self.ib) - self.k2 * x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn basal_state_is_at_rest() {
        let insulin = Signal::linear([0.0, 10.0], [11.0, 11.0]).expect("valid samples");
        let model = GlucoseInsulin::new(&insulin);
        let basal = Glucose {
            glucose: model.gb,
            insulin_action: 0.0,
        };

        let rates = model.derivative(5.0, &basal).expect("inside the signal");
        assert_relative_eq!(rates.glucose, 0.0);
        assert_relative_eq!(rates.insulin_action, 0.0);
    }

    #[test]
    fn signal_errors_propagate() {
        let insulin = Signal::linear([0.0, 10.0], [11.0, 20.0]).expect("valid samples");
        let model = GlucoseInsulin::new(&insulin);

        let result = model.derivative(12.0, &model.initial_state());
        assert!(matches!(result, Err(InterpError::OutOfBounds { .. })));
    }
}
