//! Initial value problem drivers.
//!
//! A driver integrates an [`OdeProblem`] from the start of its time span to
//! the end, watching the problem's [`Event`](modsim_core::Event) functions
//! after every accepted step. When an event function crosses zero the
//! crossing time is located on the step's continuous interpolant, recorded,
//! and, for a terminal event, becomes the end of the run.
//!
//! # Drivers
//!
//! - [`dopri5`] — adaptive Dormand–Prince 5(4) with dense output
//! - [`euler`] — fixed-step forward Euler, mainly for comparison and teaching
//!
//! Both return a [`Solution`] whose [`Status`] says how the run ended.
//! Integration failures (step size underflow, step limit, non-finite state)
//! are reported in the status together with the valid part of the
//! trajectory. Errors from the problem itself are returned as [`Error`].
//!
//! # Observer
//!
//! After each accepted step a driver emits a [`Step`] to its observer, which
//! may return [`Action::StopEarly`] to end the run.
//!
//! [`OdeProblem`]: modsim_core::OdeProblem

mod action;
mod error;
mod grid;
mod locate;
mod run;
mod solution;
mod step;
mod trajectory;

pub mod dopri5;
pub mod euler;

pub use action::Action;
pub use error::Error;
pub use solution::{Crossing, Failure, Solution, Stats, Status};
pub use step::Step;
pub use trajectory::{Sample, Trajectory};

use modsim_core::{OdeProblem, State};

/// Evaluates the problem's derivative on flat buffers.
fn derivative<P: OdeProblem>(
    problem: &P,
    t: f64,
    y: &[f64],
    out: &mut [f64],
) -> Result<(), Error> {
    let state = P::State::from_slice(y);
    let rate = problem.derivative(t, &state).map_err(Error::problem)?;
    rate.write_to(out);
    Ok(())
}

/// Checks the parts of a problem every driver relies on.
fn validate<P: OdeProblem>(problem: &P) -> Result<(), Error> {
    let span = problem.time_span();
    if !span.is_finite() {
        return Err(Error::InvalidTimeSpan {
            start: span.start,
            end: span.end,
        });
    }
    if !problem.initial_state().is_finite() {
        return Err(Error::NonFiniteInitialState);
    }
    Ok(())
}
