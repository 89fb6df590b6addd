use modsim_core::{Event, Observer, State};
use tracing::{debug, warn};

use super::{
    Action, Crossing, Error, Solution, Stats, Status, Step, Trajectory, grid::Grid,
    locate::{NonFinite, find_root},
};

/// The continuous interpolant of one accepted step.
pub(super) trait Dense {
    /// Writes the interpolated state at `t` into `out`.
    fn state_at(&self, t: f64, out: &mut [f64]);
}

/// Straight-line interpolation between the ends of a step.
pub(super) struct Linear<'a> {
    pub(super) t0: f64,
    pub(super) t1: f64,
    pub(super) y0: &'a [f64],
    pub(super) y1: &'a [f64],
}

impl Dense for Linear<'_> {
    fn state_at(&self, t: f64, out: &mut [f64]) {
        let theta = (t - self.t0) / (self.t1 - self.t0);
        for ((o, a), b) in out.iter_mut().zip(self.y0).zip(self.y1) {
            *o = a + theta * (b - a);
        }
    }
}

/// What the driver does after a step has been recorded.
pub(super) enum Flow {
    Continue,
    Stop(Status),
}

/// Bookkeeping shared by every driver: event monitoring, output sampling,
/// observer notification, and work counters.
pub(super) struct Run<'p, S> {
    direction: f64,
    events: Vec<Event<'p, S>>,
    /// Event values at the start of the current step.
    values: Vec<f64>,
    grid: Option<Grid>,
    trajectory: Trajectory<S>,
    crossings: Vec<Crossing<S>>,
    buffer: Vec<f64>,
    pub(super) stats: Stats,
}

impl<'p, S: State> Run<'p, S> {
    /// Starts bookkeeping at `(t0, y0)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteEvent`] if an event is not finite at the start.
    pub(super) fn start(
        events: Vec<Event<'p, S>>,
        direction: f64,
        t0: f64,
        y0: &[f64],
        grid: Option<Grid>,
    ) -> Result<Self, Error> {
        let state = S::from_slice(y0);
        let values = events
            .iter()
            .map(|event| finite_value(event, t0, &state))
            .collect::<Result<Vec<_>, _>>()?;

        let mut run = Self {
            direction,
            events,
            values,
            grid,
            trajectory: Trajectory::new(),
            crossings: Vec::new(),
            buffer: vec![0.0; S::dim()],
            stats: Stats::default(),
        };

        match run.grid.as_mut() {
            Some(grid) => {
                while let Some(t) = grid.take_through(t0, direction) {
                    run.trajectory.push(t, state);
                }
            }
            None => run.trajectory.push(t0, state),
        }

        Ok(run)
    }

    /// Returns the number of monitored events.
    pub(super) fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Records an accepted step from `t0` to `(t1, y1)`.
    ///
    /// Every event is checked for a crossing between the ends of the step;
    /// crossings are located on `dense` and recorded in time order. The
    /// earliest terminal crossing ends the run and becomes the last sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteEvent`] if an event evaluates to NaN or
    /// infinity during the step.
    pub(super) fn accept(
        &mut self,
        t0: f64,
        t1: f64,
        y1: &[f64],
        dense: &impl Dense,
    ) -> Result<Flow, Error> {
        let end = S::from_slice(y1);
        let mut found = Vec::new();

        let Self {
            events,
            values,
            buffer,
            ..
        } = self;
        for (index, (event, before)) in events.iter().zip(values.iter_mut()).enumerate() {
            let after = finite_value(event, t1, &end)?;
            if event.direction().is_crossing(*before, after) {
                let g = |t: f64| {
                    dense.state_at(t, buffer.as_mut_slice());
                    event.value(t, &S::from_slice(buffer.as_slice()))
                };
                let t = find_root(g, t0, t1, *before, after).map_err(|NonFinite(t)| {
                    Error::NonFiniteEvent {
                        name: event.name(),
                        t,
                    }
                })?;
                found.push((t, index));
            }
            *before = after;
        }

        let direction = self.direction;
        found.sort_by(|a, b| (direction * a.0).total_cmp(&(direction * b.0)));

        let mut stop = None;
        for (t, index) in found {
            dense.state_at(t, &mut self.buffer);
            let state = S::from_slice(&self.buffer);
            let event = &self.events[index];
            debug!(event = event.name(), t, terminal = event.is_terminal(), "event crossing");
            self.crossings.push(Crossing {
                t,
                event: index,
                name: event.name(),
                state,
            });
            if event.is_terminal() {
                stop = Some((t, index, state));
                break;
            }
        }

        let t_end = stop.map_or(t1, |(t, _, _)| t);
        if let Some(grid) = self.grid.as_mut() {
            while let Some(t) = grid.take_through(t_end, direction) {
                dense.state_at(t, &mut self.buffer);
                self.trajectory.push(t, S::from_slice(&self.buffer));
            }
        }

        match stop {
            Some((t, event, state)) => {
                let already_sampled = self.trajectory.last().is_some_and(|last| last.t == t);
                if !already_sampled {
                    self.trajectory.push(t, state);
                }
                Ok(Flow::Stop(Status::Terminated {
                    event,
                    name: self.events[event].name(),
                    t,
                }))
            }
            None => {
                if self.grid.is_none() {
                    self.trajectory.push(t1, end);
                }
                Ok(Flow::Continue)
            }
        }
    }

    /// Emits a [`Step`] and reports whether the observer asked to stop.
    pub(super) fn notify<Obs>(&mut self, observer: &mut Obs, t: f64, y: &[f64]) -> Flow
    where
        Obs: Observer<Step<S>, Action>,
    {
        let step = Step {
            step: self.stats.accepted,
            t,
            state: S::from_slice(y),
        };
        match observer.observe(&step) {
            Some(Action::StopEarly) => Flow::Stop(Status::StoppedByObserver),
            None => Flow::Continue,
        }
    }

    /// Builds the solution and logs how the run ended.
    pub(super) fn finish(self, status: Status) -> Solution<S> {
        let solution = Solution {
            status,
            trajectory: self.trajectory,
            crossings: self.crossings,
            stats: self.stats,
        };

        if solution.success() {
            debug!(
                accepted = solution.stats.accepted,
                rejected = solution.stats.rejected,
                evaluations = solution.stats.evaluations,
                "{}",
                solution.message()
            );
        } else {
            warn!(
                accepted = solution.stats.accepted,
                samples = solution.trajectory.len(),
                "integration failed: {}",
                solution.message()
            );
        }

        solution
    }
}

fn finite_value<S>(event: &Event<'_, S>, t: f64, state: &S) -> Result<f64, Error> {
    let value = event.value(t, state);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteEvent {
            name: event.name(),
            t,
        })
    }
}
