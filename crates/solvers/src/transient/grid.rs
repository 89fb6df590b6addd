use modsim_core::TimeSpan;

use super::Error;

/// Requested output times, consumed as integration passes them.
#[derive(Debug, Clone)]
pub(super) struct Grid {
    times: Vec<f64>,
    next: usize,
}

impl Grid {
    /// Validates `times` against the span.
    ///
    /// Times must be finite, inside the span, and strictly monotonic in the
    /// direction of integration.
    pub(super) fn new(times: &[f64], span: TimeSpan) -> Result<Self, Error> {
        if times.iter().any(|t| !t.is_finite()) {
            return Err(Error::InvalidGrid {
                reason: "times must be finite",
            });
        }
        if times.iter().any(|&t| !span.contains(t)) {
            return Err(Error::InvalidGrid {
                reason: "times must lie inside the time span",
            });
        }
        let direction = span.direction();
        if times.windows(2).any(|w| direction * (w[1] - w[0]) <= 0.0) {
            return Err(Error::InvalidGrid {
                reason: "times must be strictly monotonic in the direction of integration",
            });
        }

        Ok(Self {
            times: times.to_vec(),
            next: 0,
        })
    }

    /// Takes the next grid time that integration has reached at `t`.
    pub(super) fn take_through(&mut self, t: f64, direction: f64) -> Option<f64> {
        let next = *self.times.get(self.next)?;
        if direction * (next - t) <= 0.0 {
            self.next += 1;
            Some(next)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_grids() {
        let span = TimeSpan::new(0.0, 10.0);

        assert!(matches!(
            Grid::new(&[0.0, f64::NAN], span),
            Err(Error::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::new(&[0.0, 11.0], span),
            Err(Error::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::new(&[1.0, 1.0], span),
            Err(Error::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::new(&[2.0, 1.0], span),
            Err(Error::InvalidGrid { .. })
        ));
    }

    #[test]
    fn backward_grid_decreases() {
        let span = TimeSpan::new(10.0, 0.0);
        assert!(Grid::new(&[10.0, 5.0, 0.0], span).is_ok());
        assert!(Grid::new(&[0.0, 5.0], span).is_err());
    }

    #[test]
    fn take_through_yields_reached_times_in_order() {
        let mut grid =
            Grid::new(&[0.0, 1.0, 2.0, 3.0], TimeSpan::new(0.0, 3.0)).expect("valid grid");

        assert_eq!(grid.take_through(0.0, 1.0), Some(0.0));
        assert_eq!(grid.take_through(0.0, 1.0), None);
        assert_eq!(grid.take_through(2.5, 1.0), Some(1.0));
        assert_eq!(grid.take_through(2.5, 1.0), Some(2.0));
        assert_eq!(grid.take_through(2.5, 1.0), None);
        assert_eq!(grid.take_through(3.0, 1.0), Some(3.0));
        assert_eq!(grid.take_through(3.0, 1.0), None);
    }
}
