use std::convert::Infallible;

use modsim_core::{EquationProblem, Model, OdeProblem, OptimizationProblem, State, TimeSpan};

/// f(x) = x².
pub(crate) struct Square;

impl Model for Square {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(x * x)
    }
}

/// Residual `output - target`, or objective `(output - target)²`.
pub(crate) struct Target(pub(crate) f64);

impl EquationProblem<1> for Target {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([output - self.0])
    }
}

impl OptimizationProblem<1> for Target {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
        Ok((output - self.0).powi(2))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Amount {
    pub(crate) y: f64,
}

impl State for Amount {
    const NAMES: &'static [&'static str] = &["y"];

    fn write_to(&self, out: &mut [f64]) {
        out[0] = self.y;
    }

    fn from_slice(values: &[f64]) -> Self {
        Self { y: values[0] }
    }
}

/// y' = -y on [0, 5].
pub(crate) struct Decay;

impl OdeProblem for Decay {
    type State = Amount;
    type Error = Infallible;

    fn initial_state(&self) -> Amount {
        Amount { y: 1.0 }
    }

    fn time_span(&self) -> TimeSpan {
        TimeSpan::new(0.0, 5.0)
    }

    fn derivative(&self, _t: f64, state: &Amount) -> Result<Amount, Self::Error> {
        Ok(Amount { y: -state.y })
    }
}
