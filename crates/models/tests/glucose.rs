use approx::assert_relative_eq;
use modsim_interp::{Extrapolate, Kind, Signal};
use modsim_models::{Glucose, GlucoseInsulin};
use modsim_solvers::{
    calibrate::{self, Calibration},
    transient::{self, Solution, Status, dopri5},
};

const TIMES: [f64; 16] = [
    0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 19.0, 22.0, 27.0, 32.0, 42.0, 62.0, 182.0,
];

const INSULIN: [f64; 16] = [
    11.0, 26.0, 130.0, 85.0, 51.0, 49.0, 45.0, 41.0, 35.0, 30.0, 30.0, 27.0, 30.0, 26.0, 19.0,
    11.0,
];

fn insulin() -> Signal {
    Signal::linear(TIMES, INSULIN).expect("valid samples")
}

fn with_k1<'a>(base: &GlucoseInsulin<'a>, k1: f64) -> GlucoseInsulin<'a> {
    GlucoseInsulin { k1, ..*base }
}

#[test]
fn glucose_falls_after_the_insulin_pulse() {
    let insulin = insulin();
    let model = GlucoseInsulin::new(&insulin);
    let solution =
        dopri5::solve_unobserved(&model, &dopri5::Config::default()).expect("should run");

    assert_eq!(solution.status, Status::Completed);

    let last = solution.trajectory.last().expect("samples");
    assert_relative_eq!(last.t, 182.0);
    assert!(last.state.glucose < model.g0);

    let glucose = solution.trajectory.column("glucose").expect("known field");
    let action = solution.trajectory.column("insulin_action").expect("known field");
    assert!(glucose.iter().all(|&g| g > 0.0));
    assert!(action.iter().any(|&x| x > 0.0));
}

#[test]
fn step_signal_drives_the_model_too() {
    let insulin =
        Signal::new(TIMES, INSULIN, Kind::Previous, Extrapolate::Error).expect("valid samples");
    let model = GlucoseInsulin::new(&insulin);
    let solution =
        dopri5::solve_unobserved(&model, &dopri5::Config::default()).expect("should run");

    assert!(solution.success());
    assert!(solution.trajectory.last().expect("samples").state.glucose < model.g0);
}

#[test]
fn running_past_the_data_is_fatal() {
    let insulin = insulin();
    let model = GlucoseInsulin {
        end: 200.0,
        ..GlucoseInsulin::new(&insulin)
    };

    let result = dopri5::solve_unobserved(&model, &dopri5::Config::default());

    let Err(transient::Error::Problem(source)) = result else {
        panic!("expected the signal error to end the run");
    };
    assert!(source.to_string().contains("outside"));
}

#[test]
fn rate_constant_is_recovered_from_synthetic_data() {
    let insulin = insulin();
    let truth = GlucoseInsulin::new(&insulin).with_rates(0.03, 0.02, 1.5e-5);

    let grid = TIMES.to_vec();
    let run = dopri5::Config::default().with_t_eval(grid.clone());
    let measured: Vec<f64> = dopri5::solve_unobserved(&truth, &run)
        .expect("should run")
        .trajectory
        .states()
        .map(|s| s.glucose)
        .collect();
    assert_eq!(measured.len(), grid.len());

    let sse = |solution: &Solution<Glucose>| {
        let error = solution
            .trajectory
            .states()
            .zip(&measured)
            .map(|(s, m)| (s.glucose - m).powi(2))
            .sum::<f64>();
        Some(error)
    };
    let base = GlucoseInsulin::new(&insulin);
    let calibration = Calibration::new(base, with_k1, sse);

    let config = calibrate::Config::default().with_run(run);
    let solution =
        calibrate::minimize(&calibration, [0.005, 0.08], &config).expect("should converge");

    assert!(solution.status.is_converged());
    assert_relative_eq!(solution.x, 0.03, epsilon = 1e-4);
    assert_relative_eq!(calibration.base().k1, 0.02);
}
