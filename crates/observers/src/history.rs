use modsim_core::Observer;

use crate::traits::HasPosition;

/// Records the position of every event, in order.
#[derive(Debug, Clone, Default)]
pub struct History {
    positions: Vec<f64>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded positions.
    #[must_use]
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<E: HasPosition, A> Observer<E, A> for History {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.positions.push(event.position());
        None
    }
}

impl<E: HasPosition, A> Observer<E, A> for &mut History {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.positions.push(event.position());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use modsim_solvers::{equation::bisection, optimization::golden_section};

    use crate::fixtures::{Square, Target};

    #[test]
    fn records_bisection_trials() {
        let mut history = History::new();
        let config = bisection::Config::new(2, 1e-12, 1e-12, 1e-12).expect("valid config");

        bisection::solve(&Square, &Target(9.0), [0.0, 10.0], &config, &mut history)
            .expect("should finish");

        assert_eq!(history.positions(), &[0.0, 10.0, 5.0, 2.5]);
    }

    #[test]
    fn golden_section_stays_in_bounds() {
        let mut history = History::new();

        let solution = golden_section::minimize(
            &Square,
            &Target(4.0),
            [1.0, 3.0],
            &golden_section::Config::default(),
            &mut history,
        )
        .expect("should converge");

        assert!(!history.is_empty());
        assert!(history.positions().iter().all(|x| (1.0..=3.0).contains(x)));
        assert_relative_eq!(solution.x, 2.0, epsilon = 1e-6);
    }
}
