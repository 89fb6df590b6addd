/// Control actions supported by the transient drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the run after the current step.
    ///
    /// The solution reports [`Status::StoppedByObserver`](super::Status::StoppedByObserver)
    /// and keeps everything recorded up to and including this step.
    StopEarly,
}
