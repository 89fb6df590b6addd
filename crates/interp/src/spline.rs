/// A natural cubic spline through `(times, values)`.
///
/// Second derivatives vanish at both ends. Outside the sampled range the end
/// pieces are extended.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NaturalSpline {
    times: Vec<f64>,
    values: Vec<f64>,
    /// Second derivative at each knot.
    curvature: Vec<f64>,
}

impl NaturalSpline {
    /// Fits the spline. Expects at least two strictly increasing, finite times.
    pub(crate) fn new(times: Vec<f64>, values: Vec<f64>) -> Self {
        let n = times.len();
        let mut curvature = vec![0.0; n];

        if n > 2 {
            // Thomas algorithm on the interior knots.
            let m = n - 2;
            let mut diag = vec![0.0; m];
            let mut rhs = vec![0.0; m];
            let mut upper = vec![0.0; m];

            for i in 0..m {
                let h0 = times[i + 1] - times[i];
                let h1 = times[i + 2] - times[i + 1];
                diag[i] = 2.0 * (h0 + h1);
                upper[i] = h1;
                let slope0 = (values[i + 1] - values[i]) / h0;
                let slope1 = (values[i + 2] - values[i + 1]) / h1;
                rhs[i] = 6.0 * (slope1 - slope0);
            }

            for i in 1..m {
                let lower = times[i + 1] - times[i];
                let w = lower / diag[i - 1];
                diag[i] -= w * upper[i - 1];
                rhs[i] -= w * rhs[i - 1];
            }

            curvature[m] = rhs[m - 1] / diag[m - 1];
            for i in (0..m - 1).rev() {
                curvature[i + 1] = (rhs[i] - upper[i] * curvature[i + 2]) / diag[i];
            }
        }

        Self {
            times,
            values,
            curvature,
        }
    }

    /// Evaluates the piece that covers `t`, or the nearest end piece.
    pub(crate) fn at(&self, t: f64) -> f64 {
        let last = self.times.len() - 2;
        let i = self
            .times
            .partition_point(|&knot| knot <= t)
            .saturating_sub(1)
            .min(last);

        let (t0, t1) = (self.times[i], self.times[i + 1]);
        let (y0, y1) = (self.values[i], self.values[i + 1]);
        let (m0, m1) = (self.curvature[i], self.curvature[i + 1]);
        let h = t1 - t0;
        let a = (t1 - t) / h;
        let b = (t - t0) / h;

        a * y0 + b * y1 + ((a.powi(3) - a) * m0 + (b.powi(3) - b) * m1) * h * h / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn passes_through_knots() {
        let spline = NaturalSpline::new(vec![0.0, 1.0, 2.5, 4.0], vec![1.0, 3.0, -1.0, 2.0]);

        assert_relative_eq!(spline.at(0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(spline.at(1.0), 3.0, epsilon = 1e-12);
        assert_relative_eq!(spline.at(2.5), -1.0, epsilon = 1e-12);
        assert_relative_eq!(spline.at(4.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn two_knots_are_a_line() {
        let spline = NaturalSpline::new(vec![0.0, 2.0], vec![1.0, 5.0]);

        assert_relative_eq!(spline.at(0.5), 2.0);
        assert_relative_eq!(spline.at(3.0), 7.0);
    }

    #[test]
    fn reproduces_straight_lines() {
        let times = vec![0.0, 0.5, 2.0, 3.0, 7.0];
        let values = times.iter().map(|t| 3.0 * t - 1.0).collect();
        let spline = NaturalSpline::new(times, values);

        for t in [0.25, 1.3, 2.9, 6.0] {
            assert_relative_eq!(spline.at(t), 3.0 * t - 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn symmetric_data_gives_symmetric_curvature() {
        // Natural spline through (0,0), (1,1), (2,0): M1 = -3.
        let spline = NaturalSpline::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]);

        assert_relative_eq!(spline.curvature[1], -3.0, epsilon = 1e-12);
        assert_relative_eq!(spline.at(0.5), spline.at(1.5), epsilon = 1e-12);
        assert_relative_eq!(spline.at(0.5), 0.6875, epsilon = 1e-12);
    }
}
