pub mod equation;
pub mod ode;
pub mod optimization;

pub use equation::EquationProblem;
pub use ode::{Direction, Event, OdeProblem, TimeSpan};
pub use optimization::OptimizationProblem;
