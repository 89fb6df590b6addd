//! Core traits and types for the modsim workspace.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! models build on:
//!
//! - [`Model`] — a callable that maps a typed input to a typed output
//! - [`Snapshot`] — a captured input/output pair from a model call
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`State`] — a fixed-shape record of named scalars describing a system
//! - [`OdeProblem`] — a parameter record that knows its initial state, time
//!   span, derivative function, and event functions
//! - [`EquationProblem`], [`OptimizationProblem`] — problem traits that adapt
//!   solver variables to model inputs and extract metrics from outputs

mod model;
mod observer;
mod problems;
mod state;

pub use observer::Observer;
pub use problems::{Direction, EquationProblem, Event, OdeProblem, OptimizationProblem, TimeSpan};
pub use state::State;
pub use {model::Model, model::Snapshot};
