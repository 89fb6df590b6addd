use modsim_core::Observer;

use crate::traits::CanStopEarly;

/// Stops the solver once it has reported `limit` events.
#[derive(Debug, Clone, Copy)]
pub struct StopAfter {
    limit: usize,
    seen: usize,
}

impl StopAfter {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }

    /// Returns how many events have been seen.
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl<E, A: CanStopEarly> Observer<E, A> for StopAfter {
    fn observe(&mut self, _event: &E) -> Option<A> {
        self.seen += 1;
        (self.seen >= self.limit).then(A::stop_early)
    }
}
