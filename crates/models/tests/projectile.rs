use approx::assert_relative_eq;
use modsim_models::{Flight, Projectile};
use modsim_observers::StopAfter;
use modsim_solvers::{
    calibrate::{self, Calibration},
    equation::bisection,
    optimization::golden_section::{self, Bound},
    transient::{Solution, Status, dopri5},
};

fn with_angle(base: &Projectile, angle: f64) -> Projectile {
    base.with_angle(angle)
}

fn with_speed(base: &Projectile, speed: f64) -> Projectile {
    base.with_speed(speed)
}

#[test]
fn drag_free_range_matches_closed_form() {
    let ball = Projectile::new(30.0, 30.0);
    let solution = dopri5::solve_unobserved(&ball, &dopri5::Config::default()).expect("should run");

    let expected = 900.0 * 60.0_f64.to_radians().sin() / 9.8;
    assert!(matches!(solution.status, Status::Terminated { name: "ground", .. }));
    assert_relative_eq!(Projectile::range(&solution).expect("landed"), expected, epsilon = 1e-8);
}

#[test]
fn best_drag_free_angle_is_45_degrees() {
    let calibration = Calibration::new(Projectile::new(30.0, 10.0), with_angle, Projectile::range);

    let solution = calibrate::maximize(&calibration, [10.0, 80.0], &calibrate::Config::default())
        .expect("should converge");

    assert_eq!(solution.status, golden_section::Status::Converged);
    assert_relative_eq!(solution.x, 45.0, epsilon = 1e-2);
    assert_relative_eq!(solution.objective, 900.0 / 9.8, epsilon = 1e-6);
    assert_relative_eq!(solution.snapshot.input.angle, solution.x);
    assert_eq!(calibration.base().angle, 10.0);
}

#[test]
fn drag_lowers_the_best_angle() {
    let calibration = Calibration::new(Projectile::baseball(), with_angle, Projectile::range);

    let solution = calibrate::maximize(&calibration, [10.0, 80.0], &calibrate::Config::default())
        .expect("should converge");

    assert!(solution.status.is_converged());
    assert!(solution.x > 30.0 && solution.x < 45.0);

    let drag_free = Projectile::baseball().with_drag(0.0).with_angle(solution.x);
    let free =
        dopri5::solve_unobserved(&drag_free, &dopri5::Config::default()).expect("should run");
    assert!(solution.objective < Projectile::range(&free).expect("landed"));
}

#[test]
fn optimum_on_a_bound_is_reported() {
    let calibration = Calibration::new(Projectile::new(30.0, 10.0), with_angle, Projectile::range);

    let solution = calibrate::maximize(&calibration, [10.0, 30.0], &calibrate::Config::default())
        .expect("should converge");

    assert_eq!(
        solution.status,
        golden_section::Status::ConvergedAtBound(Bound::Upper)
    );
    assert_relative_eq!(solution.x, 30.0);
}

#[test]
fn iteration_limit_is_not_convergence() {
    let search = golden_section::Config::default().with_max_iters(3).expect("valid config");
    let config = calibrate::Config::default().with_search(search);
    let calibration = Calibration::new(Projectile::new(30.0, 10.0), with_angle, Projectile::range);

    let solution = calibrate::maximize(&calibration, [10.0, 80.0], &config).expect("should run");

    assert_eq!(solution.status, golden_section::Status::MaxIters);
    assert!(!solution.status.is_converged());
}

#[test]
fn launch_speed_is_calibrated_from_range() {
    let calibration = Calibration::new(Projectile::new(10.0, 45.0), with_speed, Projectile::range)
        .with_target(100.0);

    let solution = calibrate::solve_for(&calibration, [10.0, 50.0], &calibrate::Config::default())
        .expect("should converge");

    assert_eq!(solution.status, bisection::Status::Converged);
    assert_relative_eq!(solution.x, 980.0_f64.sqrt(), epsilon = 1e-6);
    assert_relative_eq!(solution.residual, 0.0, epsilon = 1e-6);
}

#[test]
fn unreachable_range_has_no_bracket() {
    let calibration = Calibration::new(Projectile::new(10.0, 45.0), with_speed, Projectile::range)
        .with_target(1000.0);

    let result = calibrate::solve_for(&calibration, [10.0, 50.0], &calibrate::Config::default());

    assert!(matches!(
        result,
        Err(bisection::Error::InvalidBracket(bisection::BracketError::NoSignChange))
    ));
}

#[test]
fn flight_without_landing_has_no_range() {
    let short = Projectile {
        duration: 0.5,
        ..Projectile::new(30.0, 45.0)
    };
    let solution =
        dopri5::solve_unobserved(&short, &dopri5::Config::default()).expect("should run");
    assert_eq!(solution.status, Status::Completed);
    assert_eq!(Projectile::range(&solution), None);

    let calibration = Calibration::new(short, with_angle, Projectile::range);
    let result = calibrate::maximize(&calibration, [10.0, 80.0], &calibrate::Config::default());
    assert!(matches!(result, Err(golden_section::Error::Problem(_))));
}

#[test]
fn observer_can_cut_a_flight_short() {
    let solution: Solution<Flight> =
        dopri5::solve(&Projectile::baseball(), &dopri5::Config::default(), StopAfter::new(2))
            .expect("should run");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert!(solution.success());
    assert_eq!(solution.stats.accepted, 2);
    assert_eq!(Projectile::range(&solution), None);
}
