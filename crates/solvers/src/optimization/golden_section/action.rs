/// Actions an observer can take during golden section search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop and return the best point found so far.
    ///
    /// The point that triggered the event is not considered.
    StopEarly,

    /// Score this point as worse than every other point.
    ///
    /// The bracket then shrinks away from it, and a successful evaluation is
    /// not kept as a candidate. This recovers from model or problem failures
    /// in a region known to be suboptimal, and can steer the search away
    /// from a region even when evaluation succeeded.
    AssumeWorse,
}
