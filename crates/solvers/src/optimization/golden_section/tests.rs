use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error;

use modsim_core::{Model, OptimizationProblem};

use super::*;

/// f(x) = x³ - 4x, with a local minimum at 2/√3 and a local maximum at -2/√3.
struct Cubic;

impl Model for Cubic {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(x.powi(3) - 4.0 * x)
    }
}

/// f(x) = x.
struct Identity;

impl Model for Identity {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(*x)
    }
}

/// f(x) = (x - 2)², failing above `threshold`.
struct Limited {
    threshold: f64,
}

#[derive(Debug, Clone, Error)]
#[error("model undefined at x = {x}")]
struct Undefined {
    x: f64,
}

impl Model for Limited {
    type Input = f64;
    type Output = f64;
    type Error = Undefined;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        if *x > self.threshold {
            Err(Undefined { x: *x })
        } else {
            Ok((x - 2.0).powi(2))
        }
    }
}

/// f(x) = -x, undefined at and above `edge`.
struct Cliff {
    edge: f64,
}

impl Model for Cliff {
    type Input = f64;
    type Output = f64;
    type Error = Undefined;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        if *x >= self.edge {
            Err(Undefined { x: *x })
        } else {
            Ok(-x)
        }
    }
}

/// Uses the model output as the objective.
struct OutputObjective;

impl OptimizationProblem<1> for OutputObjective {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Self::Error> {
        Ok(*output)
    }
}

#[test]
fn minimizes_cubic() {
    let solution = minimize_unobserved(&Cubic, &OutputObjective, [-2.0, 2.0], &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 2.0 / 3.0_f64.sqrt(), epsilon = 1e-8);
}

#[test]
fn maximizes_cubic() {
    let solution = maximize_unobserved(&Cubic, &OutputObjective, [2.0, -2.0], &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, -2.0 / 3.0_f64.sqrt(), epsilon = 1e-8);
    assert_relative_eq!(solution.snapshot.output, solution.objective);
}

#[test]
fn minimum_on_lower_bound_is_reported() {
    let solution = minimize_unobserved(&Identity, &OutputObjective, [0.0, 10.0], &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::ConvergedAtBound(Bound::Lower));
    assert!(solution.status.is_converged());
    assert_relative_eq!(solution.x, 0.0);
    assert_relative_eq!(solution.objective, 0.0);
}

#[test]
fn maximum_on_upper_bound_is_reported() {
    let solution = maximize_unobserved(&Identity, &OutputObjective, [0.0, 10.0], &Config::default())
        .expect("should converge");

    assert_eq!(solution.status, Status::ConvergedAtBound(Bound::Upper));
    assert_relative_eq!(solution.x, 10.0);
}

#[test]
fn failing_bound_keeps_converged_interior() {
    let model = Cliff { edge: 1.0 };
    let solution = minimize_unobserved(&model, &OutputObjective, [0.0, 1.0], &Config::default())
        .expect("interior result should survive a failing bound");

    assert_eq!(solution.status, Status::Converged);
    assert!(solution.x < 1.0);
    assert_relative_eq!(solution.x, 1.0, epsilon = 1e-9);
}

#[test]
fn never_evaluates_outside_bounds() {
    let mut xs = Vec::new();
    let observer = |event: &Event<'_, Identity, OutputObjective>| {
        xs.push(event.x());
        None
    };

    minimize(&Identity, &OutputObjective, [1.0, 3.0], &Config::default(), observer)
        .expect("should converge");

    assert!(xs.iter().all(|x| (1.0..=3.0).contains(x)));
}

#[test]
fn invalid_bracket_is_rejected() {
    let config = Config::default();

    assert!(matches!(
        minimize_unobserved(&Identity, &OutputObjective, [4.0, 4.0], &config),
        Err(Error::InvalidBracket { .. })
    ));
    assert!(matches!(
        maximize_unobserved(&Identity, &OutputObjective, [0.0, f64::INFINITY], &config),
        Err(Error::InvalidBracket { .. })
    ));
}

#[test]
fn observer_sees_every_evaluation_and_can_stop() {
    let mut events = 0;
    let observer = |_event: &Event<'_, Cubic, OutputObjective>| {
        events += 1;
        (events >= 3).then_some(Action::StopEarly)
    };

    let solution = minimize(&Cubic, &OutputObjective, [0.0, 3.0], &Config::default(), observer)
        .expect("should stop cleanly");

    // Two interior points, then the first iteration's point.
    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 1);
    assert_eq!(events, 3);
}

#[test]
fn events_carry_best_so_far() {
    let mut bests = Vec::new();
    let observer = |event: &Event<'_, Identity, OutputObjective>| {
        bests.push(event.best());
        None
    };

    let config = Config::new(1, 1e-12, 1e-12).expect("valid config");
    minimize(&Identity, &OutputObjective, [0.0, 10.0], &config, observer)
        .expect("should finish");

    assert_eq!(bests.len(), 3);
    assert_eq!(bests[0], None);
    let first = bests[1].expect("first point kept");
    assert_relative_eq!(first.x, 3.819_660_112_501_051, epsilon = 1e-12);
    assert_eq!(bests[2], bests[1]);
}

#[test]
fn assumed_worse_point_is_not_kept() {
    // f(x) = x on [0, 10]: interior points ~3.82 and ~6.18, then ~2.36.
    let mut events = 0;
    let observer = |_event: &Event<'_, Identity, OutputObjective>| {
        events += 1;
        (events == 3).then_some(Action::AssumeWorse)
    };

    let config = Config::new(1, 1e-12, 1e-12).expect("valid config");
    let solution = minimize(&Identity, &OutputObjective, [0.0, 10.0], &config, observer)
        .expect("should finish");

    assert_eq!(solution.status, Status::MaxIters);
    assert_relative_eq!(solution.x, 3.819_660_1, epsilon = 1e-6);
}

#[test]
fn assume_worse_steers_search() {
    // Rejecting everything below 5 pushes the minimum of f(x) = x up to 5.
    let observer = |event: &Event<'_, Identity, OutputObjective>| {
        (event.x() < 5.0).then_some(Action::AssumeWorse)
    };

    let solution = minimize(&Identity, &OutputObjective, [0.0, 10.0], &Config::default(), observer)
        .expect("should converge");

    assert!(solution.x >= 5.0);
    assert_relative_eq!(solution.x, 5.0, epsilon = 1e-6);
}

#[test]
fn failure_without_action_is_an_error() {
    let model = Limited { threshold: 5.0 };
    let result = minimize(&model, &OutputObjective, [0.0, 10.0], &Config::default(), ());

    assert!(matches!(result, Err(Error::Model(_))));
}

#[test]
fn failure_can_stop_early() {
    let model = Limited { threshold: 5.0 };
    let observer = |event: &Event<'_, Limited, OutputObjective>| {
        matches!(event, Event::ModelFailed { .. }).then_some(Action::StopEarly)
    };

    let solution = minimize(&model, &OutputObjective, [0.0, 10.0], &Config::default(), observer)
        .expect("should stop cleanly");

    // Stopped at the upper interior point; the lower one (~3.82) is kept.
    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 0);
    assert_relative_eq!(solution.x, 3.819_660_1, epsilon = 1e-6);
}

#[test]
fn failure_recovers_with_assume_worse() {
    let model = Limited { threshold: 5.0 };
    let observer = |event: &Event<'_, Limited, OutputObjective>| {
        matches!(event, Event::ModelFailed { .. }).then_some(Action::AssumeWorse)
    };

    let solution = minimize(&model, &OutputObjective, [0.0, 10.0], &Config::default(), observer)
        .expect("should recover");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 2.0, epsilon = 1e-6);
}

#[test]
fn nothing_kept_is_an_error() {
    let model = Limited {
        threshold: f64::NEG_INFINITY,
    };
    let observer = |_event: &Event<'_, Limited, OutputObjective>| Some(Action::AssumeWorse);

    let config = Config::new(10, 1e-12, 1e-12).expect("valid config");
    let result = minimize(&model, &OutputObjective, [0.0, 10.0], &config, observer);

    assert!(matches!(result, Err(Error::NoSuccessfulEvaluation)));
}

#[test]
fn nan_objective_is_an_error() {
    struct NanModel;

    impl Model for NanModel {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, _x: &f64) -> Result<f64, Self::Error> {
            Ok(f64::NAN)
        }
    }

    let result = minimize_unobserved(&NanModel, &OutputObjective, [0.0, 1.0], &Config::default());
    assert!(matches!(result, Err(Error::NanObjective { .. })));
}
