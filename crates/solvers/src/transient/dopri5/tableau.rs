//! Dormand–Prince 5(4) coefficients.
//!
//! Stage `s` is evaluated at `t + C[s] * h` with
//! `y + h * sum(A[s][j] * k[j])` for `j < s`. The seventh stage is evaluated
//! at the fifth-order solution `y + h * sum(B[j] * k[j])`, so it doubles as
//! the first stage of the next step (first same as last).

pub(super) const STAGES: usize = 7;

pub(super) const C: [f64; STAGES] = [0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

pub(super) const A: [[f64; STAGES - 1]; STAGES - 1] = [
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [1.0 / 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [3.0 / 40.0, 9.0 / 40.0, 0.0, 0.0, 0.0, 0.0],
    [44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0, 0.0, 0.0, 0.0],
    [
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
        0.0,
        0.0,
    ],
    [
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
        0.0,
    ],
];

/// Fifth-order weights.
pub(super) const B: [f64; STAGES - 1] = [
    35.0 / 384.0,
    0.0,
    500.0 / 1113.0,
    125.0 / 192.0,
    -2187.0 / 6784.0,
    11.0 / 84.0,
];

/// Difference between the fifth- and fourth-order weights.
pub(super) const E: [f64; STAGES] = [
    71.0 / 57600.0,
    0.0,
    -71.0 / 16695.0,
    71.0 / 1920.0,
    -17253.0 / 339_200.0,
    22.0 / 525.0,
    -1.0 / 40.0,
];

/// Weights of the fourth-order continuous extension.
pub(super) const D: [f64; STAGES] = [
    -12_715_105_075.0 / 11_282_082_432.0,
    0.0,
    87_487_479_700.0 / 32_700_410_799.0,
    -10_690_763_975.0 / 1_880_347_072.0,
    701_980_252_875.0 / 199_316_789_632.0,
    -1_453_857_185.0 / 822_651_844.0,
    69_997_945.0 / 29_380_423.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;

    #[test]
    fn rows_sum_to_nodes() {
        for (row, c) in A.iter().zip(C) {
            assert_abs_diff_eq!(row.iter().sum::<f64>(), c, epsilon = 1e-12);
        }
    }

    #[test]
    fn weights_are_consistent() {
        assert_abs_diff_eq!(B.iter().sum::<f64>(), 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(E.iter().sum::<f64>(), 0.0, epsilon = 1e-14);
    }
}
