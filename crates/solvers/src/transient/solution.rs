use thiserror::Error;

use super::Trajectory;

/// How a transient run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Status {
    /// Reached the end of the time span.
    Completed,

    /// A terminal event fired; the last trajectory sample is the crossing.
    Terminated {
        /// Index of the event in the problem's event list.
        event: usize,
        name: &'static str,
        t: f64,
    },

    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,

    /// Integration could not continue.
    Failed(Failure),
}

/// Why integration could not continue.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Failure {
    #[error("required step size {h:e} at t = {t} is too small")]
    StepSizeTooSmall { t: f64, h: f64 },

    #[error("reached the step limit of {steps} at t = {t}")]
    MaxStepsExceeded { t: f64, steps: usize },

    #[error("state became non-finite at t = {t}")]
    NonFiniteState { t: f64 },
}

/// A located zero crossing of an event function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<S> {
    pub t: f64,

    /// Index of the event in the problem's event list.
    pub event: usize,

    pub name: &'static str,

    /// Interpolated state at `t`.
    pub state: S,
}

/// Work counters for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Derivative evaluations.
    pub evaluations: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// The result of a transient run.
#[derive(Debug, Clone)]
pub struct Solution<S> {
    pub status: Status,

    /// Samples from the start of the span to where the run ended.
    pub trajectory: Trajectory<S>,

    /// Every located crossing, in the order they occurred.
    pub crossings: Vec<Crossing<S>>,

    pub stats: Stats,
}

impl<S> Solution<S> {
    /// Returns false only for [`Status::Failed`].
    ///
    /// Runs ended by a terminal event or by an observer are successful.
    #[must_use]
    pub fn success(&self) -> bool {
        !matches!(self.status, Status::Failed(_))
    }

    /// Describes how the run ended.
    #[must_use]
    pub fn message(&self) -> String {
        match self.status {
            Status::Completed => "reached the end of the time span".to_owned(),
            Status::Terminated { name, t, .. } => format!("terminal event `{name}` at t = {t}"),
            Status::StoppedByObserver => "stopped by observer".to_owned(),
            Status::Failed(failure) => failure.to_string(),
        }
    }

    /// Returns the crossings of the named event.
    pub fn crossings_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Crossing<S>> {
        self.crossings.iter().filter(move |c| c.name == name)
    }
}
