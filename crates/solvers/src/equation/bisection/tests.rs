use super::*;

use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error;

struct Square;

impl Model for Square {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        Ok(x * x)
    }
}

#[derive(Debug, Error)]
#[error("model undefined above x = 5")]
struct Undefined;

/// Squares its input but cannot be evaluated above 5.
struct LimitedSquare;

impl Model for LimitedSquare {
    type Input = f64;
    type Output = f64;
    type Error = Undefined;

    fn call(&self, x: &f64) -> Result<f64, Self::Error> {
        if *x > 5.0 { Err(Undefined) } else { Ok(x * x) }
    }
}

/// Model that returns NaN everywhere.
struct Broken;

impl Model for Broken {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, _x: &f64) -> Result<f64, Self::Error> {
        Ok(f64::NAN)
    }
}

struct Target(f64);

impl EquationProblem<1> for Target {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<f64, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _input: &f64, output: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([output - self.0])
    }
}

#[test]
fn finds_square_root() {
    let solution = solve_unobserved(&Square, &Target(9.0), [0.0, 10.0], &Config::default())
        .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
    assert_relative_eq!(solution.snapshot.output, 9.0, epsilon = 1e-9);
}

#[test]
fn accepts_reversed_bracket() {
    let solution = solve_unobserved(&Square, &Target(36.0), [10.0, 0.0], &Config::default())
        .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 6.0, epsilon = 1e-10);
}

#[test]
fn endpoint_root_converges_without_iterating() {
    let solution = solve_unobserved(&Square, &Target(4.0), [2.0, 7.0], &Config::default())
        .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(solution.iters, 0);
    assert_relative_eq!(solution.x, 2.0);
}

#[test]
fn same_sign_endpoints_are_rejected() {
    let result = solve_unobserved(&Square, &Target(9.0), [5.0, 10.0], &Config::default());

    assert!(matches!(
        result,
        Err(Error::InvalidBracket(BracketError::NoSignChange))
    ));
}

#[test]
fn bad_endpoints_are_rejected() {
    let problem = Target(1.0);
    let config = Config::default();

    assert!(matches!(
        solve_unobserved(&Square, &problem, [3.0, 3.0], &config),
        Err(Error::InvalidBracket(BracketError::ZeroWidth))
    ));
    assert!(matches!(
        solve_unobserved(&Square, &problem, [f64::NAN, 3.0], &config),
        Err(Error::InvalidBracket(BracketError::NonFinite))
    ));
}

#[test]
fn zero_iterations_returns_better_endpoint() {
    let config = Config::new(0, 1e-12, 1e-12, 1e-12).expect("valid config");
    let solution =
        solve_unobserved(&Square, &Target(9.0), [2.0, 10.0], &config).expect("should finish");

    // |4 - 9| = 5 beats |100 - 9| = 91
    assert_eq!(solution.status, Status::MaxIters);
    assert_eq!(solution.iters, 0);
    assert_relative_eq!(solution.x, 2.0);
}

#[test]
fn non_finite_residual_is_an_error() {
    let result = solve_unobserved(&Broken, &Target(1.0), [0.0, 1.0], &Config::default());
    assert!(matches!(result, Err(Error::NonFiniteResidual { x, .. }) if x == 0.0));
}

#[test]
fn model_failure_is_an_error_without_recovery() {
    let result = solve_unobserved(&LimitedSquare, &Target(9.0), [0.0, 8.0], &Config::default());
    assert!(matches!(result, Err(Error::Model(_))));
}

#[test]
fn observer_recovers_from_model_failure() {
    let mut failures = 0;
    let observer = |event: &Event<'_, LimitedSquare, Target>| {
        if event.result().is_err() {
            failures += 1;
            Some(Action::assume_positive())
        } else {
            None
        }
    };

    let solution = solve(&LimitedSquare, &Target(9.0), [0.0, 8.0], &Config::default(), observer)
        .expect("should recover");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
    assert_eq!(failures, 1);
}

#[test]
fn observer_can_stop_early() {
    let mut seen = Vec::new();
    let observer = |event: &Event<'_, Square, Target>| {
        seen.push(event.x());
        matches!(event, Event::Midpoint { .. }).then_some(Action::StopEarly)
    };

    let solution = solve(&Square, &Target(9.0), [0.0, 10.0], &Config::default(), observer)
        .expect("should stop cleanly");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_eq!(solution.iters, 1);
    assert_eq!(seen, vec![0.0, 10.0, 5.0]);
    // |0 - 9| at the left endpoint still beats |25 - 9| at the midpoint
    assert_relative_eq!(solution.x, 0.0);
}
