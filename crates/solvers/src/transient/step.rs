/// Event emitted to the observer after each accepted step.
#[derive(Debug, Clone, Copy)]
pub struct Step<S> {
    /// Accepted step count, starting at 1.
    pub step: usize,

    /// Time at the end of the step.
    pub t: f64,

    /// State at the end of the step.
    pub state: S,
}
