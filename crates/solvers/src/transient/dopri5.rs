//! Adaptive Dormand–Prince 5(4) driver.
//!
//! # Algorithm
//!
//! Each step evaluates seven stages and forms a fifth-order solution together
//! with an embedded fourth-order error estimate. The last stage is evaluated
//! at the new solution and reused as the first stage of the next step, so an
//! attempted step costs six derivative evaluations.
//!
//! A step is accepted when the RMS of its error, scaled per component by
//! `atol + rtol * max(|y_old|, |y_new|)`, is at most one. The next step size is
//! `h * 0.9 * err^(-1/5)`, with the factor clamped to `[0.2, 10]` and capped
//! at one right after a rejection. Unless a first step is configured, the
//! initial step size is estimated from the derivative at the start.
//!
//! Accepted steps carry a fourth-order continuous extension that is used to
//! locate event crossings and to sample the trajectory on a requested grid.
//!
//! # Failures
//!
//! The run ends with [`Status::Failed`] when the step size falls below what
//! the floating point resolution of `t` allows, when the accepted step limit
//! is reached, or when the state cannot be kept finite. The trajectory holds
//! everything computed up to that point.

mod config;
mod tableau;


pub use config::{Config, ConfigError};

use modsim_core::{Observer, OdeProblem, State};
use tracing::debug;

use super::{
    Action, Error, Failure, Solution, Status, Step, derivative,
    grid::Grid,
    run::{Dense, Flow, Run},
    validate,
};

use tableau::{A, B, C, D, E, STAGES};

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;

/// Integrates the problem over its time span.
///
/// The observer receives a [`Step`] after every accepted step that does not
/// end the run, and may return [`Action::StopEarly`].
///
/// # Errors
///
/// Returns an [`Error`] if the time span or initial state is not finite, the
/// output grid is invalid, an event function is not finite, or the
/// derivative fails. Integration failures are reported in the solution's
/// [`Status`] instead.
pub fn solve<P, Obs>(
    problem: &P,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<P::State>, Error>
where
    P: OdeProblem,
    Obs: Observer<Step<P::State>, Action>,
{
    validate(problem)?;

    let span = problem.time_span();
    let direction = span.direction();
    let grid = config
        .t_eval()
        .map(|times| Grid::new(times, span))
        .transpose()?;

    let dim = P::State::dim();
    let mut t = span.start;
    let mut y = problem.initial_state().to_vec();
    let mut run = Run::start(problem.events(), direction, t, &y, grid)?;

    debug!(
        start = span.start,
        end = span.end,
        dim,
        events = run.event_count(),
        rtol = config.rtol(),
        atol = config.atol(),
        "starting dopri5 run"
    );

    if span.duration() == 0.0 {
        return Ok(run.finish(Status::Completed));
    }

    let mut stages = Stages::new(dim);
    derivative(problem, t, &y, &mut stages.k[0])?;
    run.stats.evaluations += 1;

    let max_step = config.max_step().unwrap_or(f64::INFINITY);
    let mut h = match config.first_step() {
        Some(h) => h,
        None => {
            run.stats.evaluations += 1;
            initial_step(problem, config, t, &y, &stages.k[0], span.end)?
        }
    }
    .min(max_step)
    .min(span.duration().abs());

    let mut y_new = vec![0.0; dim];
    let mut err = vec![0.0; dim];
    let mut segment = Segment::new(dim);
    let mut just_rejected = false;

    while t != span.end {
        let min_step = 10.0 * (f64::EPSILON * t.abs()).max(f64::MIN_POSITIVE);
        if h < min_step {
            return Ok(run.finish(Status::Failed(Failure::StepSizeTooSmall { t, h })));
        }
        if run.stats.accepted >= config.max_steps() {
            let steps = run.stats.accepted;
            return Ok(run.finish(Status::Failed(Failure::MaxStepsExceeded { t, steps })));
        }

        // Land exactly on the end of the span.
        let t_new = if h >= (span.end - t).abs() {
            span.end
        } else {
            t + direction * h
        };
        let step = t_new - t;

        stages.advance(problem, t, &y, step, t_new, &mut y_new, &mut err)?;
        run.stats.evaluations += STAGES - 1;

        let norm = error_norm(&err, &y, &y_new, config);
        if !norm.is_finite() || y_new.iter().any(|v| !v.is_finite()) {
            run.stats.rejected += 1;
            h = step.abs() * MIN_FACTOR;
            if h < min_step {
                return Ok(run.finish(Status::Failed(Failure::NonFiniteState { t: t_new })));
            }
            just_rejected = true;
            continue;
        }

        if norm > 1.0 {
            run.stats.rejected += 1;
            h = step.abs() * (SAFETY * norm.powf(-0.2)).max(MIN_FACTOR);
            just_rejected = true;
            continue;
        }

        run.stats.accepted += 1;
        segment.fit(&stages, t, step, &y, &y_new);
        let flow = run.accept(t, t_new, &y_new, &segment)?;

        t = t_new;
        y.copy_from_slice(&y_new);
        stages.k.swap(0, STAGES - 1);

        if let Flow::Stop(status) = flow {
            return Ok(run.finish(status));
        }
        if let Flow::Stop(status) = run.notify(&mut observer, t, &y) {
            return Ok(run.finish(status));
        }

        let mut factor = if norm == 0.0 {
            MAX_FACTOR
        } else {
            (SAFETY * norm.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
        };
        if just_rejected {
            factor = factor.min(1.0);
            just_rejected = false;
        }
        h = (step.abs() * factor).min(max_step);
    }

    Ok(run.finish(Status::Completed))
}

/// Integrates the problem without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<P: OdeProblem>(
    problem: &P,
    config: &Config,
) -> Result<Solution<P::State>, Error> {
    solve(problem, config, ())
}

/// Stage derivatives of the current step.
struct Stages {
    k: [Vec<f64>; STAGES],
    scratch: Vec<f64>,
}

impl Stages {
    fn new(dim: usize) -> Self {
        Self {
            k: std::array::from_fn(|_| vec![0.0; dim]),
            scratch: vec![0.0; dim],
        }
    }

    /// Takes a step of signed size `h` from `(t, y)`.
    ///
    /// Expects `k[0]` to hold the derivative at `(t, y)`. Writes the
    /// fifth-order solution to `y_new`, its error estimate to `err`, and the
    /// derivative at `(t_new, y_new)` to `k[6]`.
    #[allow(clippy::too_many_arguments, clippy::float_cmp)]
    fn advance<P: OdeProblem>(
        &mut self,
        problem: &P,
        t: f64,
        y: &[f64],
        h: f64,
        t_new: f64,
        y_new: &mut [f64],
        err: &mut [f64],
    ) -> Result<(), Error> {
        for s in 1..STAGES - 1 {
            for (i, out) in self.scratch.iter_mut().enumerate() {
                let slope: f64 = (0..s).map(|j| A[s][j] * self.k[j][i]).sum();
                *out = y[i] + h * slope;
            }
            // The final stage is exactly the step end.
            let stage_t = if C[s] == 1.0 { t_new } else { t + C[s] * h };
            derivative(problem, stage_t, &self.scratch, &mut self.k[s])?;
        }

        for (i, out) in y_new.iter_mut().enumerate() {
            let slope: f64 = B.iter().enumerate().map(|(j, b)| b * self.k[j][i]).sum();
            *out = y[i] + h * slope;
        }
        derivative(problem, t_new, y_new, &mut self.k[STAGES - 1])?;

        for (i, out) in err.iter_mut().enumerate() {
            *out = h * E.iter().enumerate().map(|(j, e)| e * self.k[j][i]).sum::<f64>();
        }
        Ok(())
    }
}

/// The continuous extension of an accepted step.
struct Segment {
    t0: f64,
    h: f64,
    r: [Vec<f64>; 5],
}

impl Segment {
    fn new(dim: usize) -> Self {
        Self {
            t0: 0.0,
            h: 0.0,
            r: std::array::from_fn(|_| vec![0.0; dim]),
        }
    }

    /// Builds the interpolant for the step from `(t0, y0)` to `y1`.
    ///
    /// `stages` must still hold the step's stage derivatives.
    fn fit(&mut self, stages: &Stages, t0: f64, h: f64, y0: &[f64], y1: &[f64]) {
        self.t0 = t0;
        self.h = h;
        let k = &stages.k;
        for i in 0..y0.len() {
            let r2 = y1[i] - y0[i];
            let r3 = h * k[0][i] - r2;
            let r4 = r2 - h * k[STAGES - 1][i] - r3;
            let r5 = h * D.iter().enumerate().map(|(j, d)| d * k[j][i]).sum::<f64>();
            self.r[0][i] = y0[i];
            self.r[1][i] = r2;
            self.r[2][i] = r3;
            self.r[3][i] = r4;
            self.r[4][i] = r5;
        }
    }
}

impl Dense for Segment {
    fn state_at(&self, t: f64, out: &mut [f64]) {
        let theta = (t - self.t0) / self.h;
        let theta1 = 1.0 - theta;
        let [r1, r2, r3, r4, r5] = &self.r;
        for (i, o) in out.iter_mut().enumerate() {
            *o = r1[i] + theta * (r2[i] + theta1 * (r3[i] + theta * (r4[i] + theta1 * r5[i])));
        }
    }
}

/// Returns the root mean square of `dim` values.
fn rms(values: impl Iterator<Item = f64>, dim: usize) -> f64 {
    if dim == 0 {
        return 0.0;
    }
    (values.map(|v| v * v).sum::<f64>() / dim as f64).sqrt()
}

fn error_norm(err: &[f64], y: &[f64], y_new: &[f64], config: &Config) -> f64 {
    let scaled = err
        .iter()
        .zip(y.iter().zip(y_new))
        .map(|(e, (a, b))| e / (config.atol() + config.rtol() * a.abs().max(b.abs())));
    rms(scaled, err.len())
}

/// Estimates a first step size from the derivative at the start.
///
/// Costs one derivative evaluation.
fn initial_step<P: OdeProblem>(
    problem: &P,
    config: &Config,
    t0: f64,
    y0: &[f64],
    f0: &[f64],
    end: f64,
) -> Result<f64, Error> {
    let dim = y0.len();
    let span = (end - t0).abs();
    let direction = (end - t0).signum();
    let scale: Vec<f64> = y0
        .iter()
        .map(|y| config.atol() + config.rtol() * y.abs())
        .collect();

    let d0 = rms(y0.iter().zip(&scale).map(|(y, s)| y / s), dim);
    let d1 = rms(f0.iter().zip(&scale).map(|(f, s)| f / s), dim);
    let h0 = if d0 < 1e-5 || d1 < 1e-5 {
        1e-6
    } else {
        0.01 * d0 / d1
    }
    .min(span);

    let y1: Vec<f64> = y0
        .iter()
        .zip(f0)
        .map(|(y, f)| y + direction * h0 * f)
        .collect();
    let mut f1 = vec![0.0; dim];
    let t1 = if h0 >= span { end } else { t0 + direction * h0 };
    derivative(problem, t1, &y1, &mut f1)?;

    let d2 = rms(
        f1.iter()
            .zip(f0)
            .zip(&scale)
            .map(|((a, b), s)| (a - b) / s),
        dim,
    ) / h0;

    let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
        (h0 * 1e-3).max(1e-6)
    } else {
        (0.01 / d1.max(d2)).powf(0.2)
    };

    let h = (100.0 * h0).min(h1).min(span);
    Ok(if h.is_finite() && h > 0.0 { h } else { h0 })
}
