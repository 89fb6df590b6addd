use std::slice;

use modsim_core::State;

/// A state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample<S> {
    pub t: f64,
    pub state: S,
}

/// Time-ordered samples produced by a run.
///
/// Times are strictly monotonic in the direction of integration: increasing
/// for a forward run, decreasing for a backward one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory<S> {
    samples: Vec<Sample<S>>,
}

impl<S> Trajectory<S> {
    pub(super) fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    pub(super) fn push(&mut self, t: f64, state: S) {
        self.samples.push(Sample { t, state });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Sample<S>> {
        self.samples.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample<S>> {
        self.samples.last()
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample<S>] {
        &self.samples
    }

    pub fn iter(&self) -> slice::Iter<'_, Sample<S>> {
        self.samples.iter()
    }

    /// Returns the sample times.
    #[must_use]
    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.t).collect()
    }

    /// Returns the states in time order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.samples.iter().map(|s| &s.state)
    }
}

impl<S: State> Trajectory<S> {
    /// Returns one state field over time, or `None` if no field has that name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = S::index_of(name)?;
        let mut buffer = vec![0.0; S::dim()];
        Some(
            self.samples
                .iter()
                .map(|s| {
                    s.state.write_to(&mut buffer);
                    buffer[index]
                })
                .collect(),
        )
    }
}

impl<'a, S> IntoIterator for &'a Trajectory<S> {
    type Item = &'a Sample<S>;
    type IntoIter = slice::Iter<'a, Sample<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
