/// Extrapolation strategy
///
/// Controls what happens when a signal is queried outside its sampled range.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Extrapolate<T> {
    /// Evaluate beyond the sampled range.
    ///
    /// Nearest-sample kinds hold the end value, which is the same as
    /// [`Clamp`](Extrapolate::Clamp).
    Enable,
    /// If the query is beyond the sampled range, return this value instead.
    Fill(T),
    /// Restrict the query to the sampled range.
    Clamp,
    /// Wrap around to the other end of periodic data. Does NOT check that
    /// first and last values are equal.
    Wrap,
    /// Return an error when the query is beyond the sampled range.
    #[default]
    Error,
}

impl<T> From<Extrapolate<T>> for ninterp::interpolator::Extrapolate<T> {
    fn from(value: Extrapolate<T>) -> Self {
        match value {
            Extrapolate::Enable => ninterp::interpolator::Extrapolate::Enable,
            Extrapolate::Fill(val) => ninterp::interpolator::Extrapolate::Fill(val),
            Extrapolate::Clamp => ninterp::interpolator::Extrapolate::Clamp,
            Extrapolate::Wrap => ninterp::interpolator::Extrapolate::Wrap,
            Extrapolate::Error => ninterp::interpolator::Extrapolate::Error,
        }
    }
}
