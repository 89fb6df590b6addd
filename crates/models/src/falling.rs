use std::convert::Infallible;

use modsim_core::{Direction, Event, OdeProblem, State, TimeSpan};

/// Height and vertical velocity of a falling object.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fall {
    /// Height above the ground (m).
    pub y: f64,
    /// Vertical velocity, positive upward (m/s).
    pub v: f64,
}

impl State for Fall {
    const NAMES: &'static [&'static str] = &["y", "v"];

    fn write_to(&self, out: &mut [f64]) {
        out[0] = self.y;
        out[1] = self.v;
    }

    fn from_slice(values: &[f64]) -> Self {
        Self {
            y: values[0],
            v: values[1],
        }
    }
}

/// An object dropped from rest, falling until it hits the ground.
///
/// Drag is quadratic in speed and parameterized by terminal velocity: at
/// `|v| == terminal_velocity` drag balances gravity. Without a terminal
/// velocity the fall is drag-free.
///
/// The `ground` event ends the run when the height falls through zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallingObject {
    /// Initial height (m).
    pub height: f64,
    /// Initial vertical velocity (m/s).
    pub velocity: f64,
    /// Gravitational acceleration (m/s²).
    pub g: f64,
    /// Speed at which drag balances gravity (m/s).
    pub terminal_velocity: Option<f64>,
    /// Longest simulated time (s).
    pub duration: f64,
}

impl FallingObject {
    /// A drag-free fall from `height` under gravity `g`.
    #[must_use]
    pub fn new(height: f64, g: f64) -> Self {
        Self {
            height,
            velocity: 0.0,
            g,
            terminal_velocity: None,
            duration: 100.0,
        }
    }

    /// A penny dropped from the top of the Empire State Building.
    #[must_use]
    pub fn penny() -> Self {
        Self::new(381.0, 9.8)
    }

    /// Returns `self` with quadratic drag, keeping other fields unchanged.
    #[must_use]
    pub fn with_terminal_velocity(self, terminal_velocity: f64) -> Self {
        Self {
            terminal_velocity: Some(terminal_velocity),
            ..self
        }
    }

    /// Returns `self` with the given duration, keeping other fields unchanged.
    #[must_use]
    pub fn with_duration(self, duration: f64) -> Self {
        Self { duration, ..self }
    }

    fn acceleration(&self, v: f64) -> f64 {
        let drag = match self.terminal_velocity {
            Some(vt) => self.g * v * v.abs() / (vt * vt),
            None => 0.0,
        };
        -self.g - drag
    }
}

impl OdeProblem for FallingObject {
    type State = Fall;
    type Error = Infallible;

    fn initial_state(&self) -> Fall {
        Fall {
            y: self.height,
            v: self.velocity,
        }
    }

    fn time_span(&self) -> TimeSpan {
        TimeSpan::new(0.0, self.duration)
    }

    fn derivative(&self, _t: f64, state: &Fall) -> Result<Fall, Self::Error> {
        Ok(Fall {
            y: state.v,
            v: self.acceleration(state.v),
        })
    }

    fn events(&self) -> Vec<Event<'_, Fall>> {
        vec![Event::terminal("ground", Direction::Falling, |_t, s: &Fall| {
            s.y
        })]
    }
}
