//! Solvers for the modsim workspace.
//!
//! - [`transient`] — initial value problem drivers ([`transient::dopri5`],
//!   [`transient::euler`]) with event detection and dense interpolation
//! - [`equation`] — root finding on bracketed intervals
//!   ([`equation::bisection`])
//! - [`optimization`] — bounded scalar optimization
//!   ([`optimization::golden_section`])
//! - [`calibrate`] — runs a full simulation per trial value of one parameter
//!   and hands the resulting scalar to an equation or optimization solver

pub mod calibrate;
pub mod equation;
pub mod optimization;
pub mod transient;

mod trial;
