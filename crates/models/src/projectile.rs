use std::convert::Infallible;

use modsim_core::{Direction, Event, OdeProblem, State, TimeSpan};
use modsim_solvers::transient::Solution;

/// Position and velocity of a projectile in a vertical plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flight {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl State for Flight {
    const NAMES: &'static [&'static str] = &["x", "y", "vx", "vy"];

    fn write_to(&self, out: &mut [f64]) {
        out.copy_from_slice(&[self.x, self.y, self.vx, self.vy]);
    }

    fn from_slice(values: &[f64]) -> Self {
        Self {
            x: values[0],
            y: values[1],
            vx: values[2],
            vy: values[3],
        }
    }
}

/// A projectile launched at `speed` and `angle` (degrees above horizontal).
///
/// Drag acceleration is `-k |v| v`, where `k = rho * c_d * area / (2 * mass)`
/// is stored directly as `drag`. The `ground` event ends the run when the
/// projectile falls through `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projectile {
    /// Launch speed (m/s).
    pub speed: f64,
    /// Launch angle (degrees).
    pub angle: f64,
    /// Launch height (m).
    pub height: f64,
    /// Gravitational acceleration (m/s²).
    pub g: f64,
    /// Drag constant (1/m).
    pub drag: f64,
    /// Longest simulated time (s).
    pub duration: f64,
}

impl Projectile {
    /// A drag-free launch from the ground.
    #[must_use]
    pub fn new(speed: f64, angle: f64) -> Self {
        Self {
            speed,
            angle,
            height: 0.0,
            g: 9.8,
            drag: 0.0,
            duration: 100.0,
        }
    }

    /// A baseball hit at 40 m/s and 45° from a height of 1 m.
    #[must_use]
    pub fn baseball() -> Self {
        let (mass, diameter, c_d, rho) = (0.145, 0.073, 0.33, 1.2);
        let area = std::f64::consts::PI * diameter * diameter / 4.0;
        Self {
            height: 1.0,
            drag: rho * c_d * area / (2.0 * mass),
            ..Self::new(40.0, 45.0)
        }
    }

    /// Returns `self` with the given angle, keeping other fields unchanged.
    #[must_use]
    pub fn with_angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    /// Returns `self` with the given speed, keeping other fields unchanged.
    #[must_use]
    pub fn with_speed(self, speed: f64) -> Self {
        Self { speed, ..self }
    }

    /// Returns `self` with the given drag constant, keeping other fields unchanged.
    #[must_use]
    pub fn with_drag(self, drag: f64) -> Self {
        Self { drag, ..self }
    }

    /// Returns the horizontal distance at which the projectile landed.
    ///
    /// `None` if the run ended before the ground event.
    #[must_use]
    pub fn range(solution: &Solution<Flight>) -> Option<f64> {
        solution.crossings_of("ground").last().map(|c| c.state.x)
    }
}

impl OdeProblem for Projectile {
    type State = Flight;
    type Error = Infallible;

    fn initial_state(&self) -> Flight {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        Flight {
            x: 0.0,
            y: self.height,
            vx: self.speed * cos,
            vy: self.speed * sin,
        }
    }

    fn time_span(&self) -> TimeSpan {
        TimeSpan::new(0.0, self.duration)
    }

    fn derivative(&self, _t: f64, state: &Flight) -> Result<Flight, Self::Error> {
        let speed = state.vx.hypot(state.vy);
        Ok(Flight {
            x: state.vx,
            y: state.vy,
            vx: -self.drag * speed * state.vx,
            vy: -self.g - self.drag * speed * state.vy,
        })
    }

    fn events(&self) -> Vec<Event<'_, Flight>> {
        vec![Event::terminal("ground", Direction::Falling, |_t, s: &Flight| {
            s.y
        })]
    }
}
