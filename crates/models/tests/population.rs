use approx::assert_abs_diff_eq;
use modsim_models::Population;
use modsim_observers::History;
use modsim_solvers::transient::{Status, dopri5, euler};

#[test]
fn logistic_growth_matches_closed_form() {
    let world = Population::world();
    let solution =
        dopri5::solve_unobserved(&world, &dopri5::Config::default()).expect("should run");

    assert_eq!(solution.status, Status::Completed);
    for sample in &solution.trajectory {
        assert_abs_diff_eq!(sample.state.p, world.exact(sample.t), epsilon = 1e-4);
    }
}

#[test]
fn threshold_crossing_is_recorded() {
    let world = Population::world().with_threshold(5.0);
    let solution =
        dopri5::solve_unobserved(&world, &dopri5::Config::default()).expect("should run");

    // Recorded events never end the run.
    assert_eq!(solution.status, Status::Completed);
    assert_abs_diff_eq!(solution.trajectory.last().expect("samples").t, 2016.0);

    let crossings: Vec<_> = solution.crossings_of("threshold").collect();
    assert_eq!(crossings.len(), 1);

    let ratio = (world.capacity / world.p0 - 1.0) / (world.capacity / 5.0 - 1.0);
    let expected = world.start + ratio.ln() / world.r;
    assert_abs_diff_eq!(crossings[0].t, expected, epsilon = 1e-3);
    assert_abs_diff_eq!(crossings[0].state.p, 5.0, epsilon = 1e-8);
}

#[test]
fn yearly_grid_is_honored() {
    let years: Vec<f64> = (1950..=2016).map(f64::from).collect();
    let config = dopri5::Config::default().with_t_eval(years.clone());
    let world = Population::world();
    let solution = dopri5::solve_unobserved(&world, &config).expect("should run");

    assert_eq!(solution.trajectory.times(), years);
    let column = solution.trajectory.column("p").expect("known field");
    assert_eq!(column.len(), years.len());
    assert_abs_diff_eq!(column[66], world.exact(2016.0), epsilon = 1e-4);
}

#[test]
fn adaptive_steps_beat_yearly_euler() {
    let world = Population::world();
    let exact = world.exact(world.end);

    let adaptive =
        dopri5::solve_unobserved(&world, &dopri5::Config::default()).expect("should run");
    let fixed = euler::solve_unobserved(&world, &euler::Config::new(1.0).expect("valid dt"))
        .expect("should run");

    let adaptive_error = (adaptive.trajectory.last().expect("samples").state.p - exact).abs();
    let fixed_error = (fixed.trajectory.last().expect("samples").state.p - exact).abs();
    assert_eq!(fixed.stats.accepted, 66);
    assert!(adaptive_error < 1e-4);
    assert!(fixed_error > 100.0 * adaptive_error);
}

#[test]
fn history_sees_every_step_in_order() {
    let mut history = History::new();
    let solution = dopri5::solve(&Population::world(), &dopri5::Config::default(), &mut history)
        .expect("should run");

    assert_eq!(history.len(), solution.stats.accepted);
    assert!(history.positions().windows(2).all(|w| w[0] < w[1]));
    assert_abs_diff_eq!(*history.positions().last().expect("steps"), 2016.0);
}
