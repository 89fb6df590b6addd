use modsim_core::Observer;
use tracing::debug;

use crate::traits::HasPosition;

/// Logs every event at debug level and never intervenes.
///
/// Install a `tracing` subscriber to see the output.
#[derive(Debug, Clone)]
pub struct Tracer {
    name: &'static str,
    events: usize,
}

impl Tracer {
    /// Creates a tracer whose log lines carry `name`.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name, events: 0 }
    }

    /// Returns how many events have been logged.
    #[must_use]
    pub fn events(&self) -> usize {
        self.events
    }

    fn log(&mut self, position: f64) {
        self.events += 1;
        debug!(solver = self.name, event = self.events, position, "observed");
    }
}

impl<E: HasPosition, A> Observer<E, A> for Tracer {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.log(event.position());
        None
    }
}

impl<E: HasPosition, A> Observer<E, A> for &mut Tracer {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.log(event.position());
        None
    }
}
