/// The interpolating polynomial through every sample, in barycentric form.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Barycentric {
    times: Vec<f64>,
    values: Vec<f64>,
    weights: Vec<f64>,
}

impl Barycentric {
    /// Expects at least one sample with distinct times.
    pub(crate) fn new(times: Vec<f64>, values: Vec<f64>) -> Self {
        let weights = times
            .iter()
            .enumerate()
            .map(|(j, tj)| {
                let product: f64 = times
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != j)
                    .map(|(_, tk)| tj - tk)
                    .product();
                1.0 / product
            })
            .collect();

        Self {
            times,
            values,
            weights,
        }
    }

    pub(crate) fn at(&self, t: f64) -> f64 {
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for ((tj, yj), wj) in self.times.iter().zip(&self.values).zip(&self.weights) {
            let dt = t - tj;
            if dt == 0.0 {
                return *yj;
            }
            let term = wj / dt;
            numerator += term * yj;
            denominator += term;
        }
        numerator / denominator
    }
}
