/// A scalar objective over `N` solver variables.
///
/// The problem turns a trial `x` into a model input and scores the model's
/// output. Whether lower or higher scores are better is decided by the solver
/// entry point (`minimize` or `maximize`), never by the problem.
///
/// # Example
///
/// Scoring a single parameter by the squared miss of a target value:
///
/// ```
/// use std::convert::Infallible;
///
/// use modsim_core::OptimizationProblem;
///
/// struct Miss {
///     target: f64,
/// }
///
/// impl OptimizationProblem<1> for Miss {
///     type Input = f64;
///     type Output = f64;
///     type Error = Infallible;
///
///     fn input(&self, x: &[f64; 1]) -> Result<f64, Infallible> {
///         Ok(x[0])
///     }
///
///     fn objective(&self, _input: &f64, output: &f64) -> Result<f64, Infallible> {
///         Ok((output - self.target).powi(2))
///     }
/// }
///
/// let miss = Miss { target: 2.0 };
/// let input = miss.input(&[3.0]).unwrap();
/// assert_eq!(miss.objective(&input, &5.0).unwrap(), 9.0);
/// ```
pub trait OptimizationProblem<const N: usize> {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the model input for the trial `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if `x` does not describe a valid input.
    fn input(&self, x: &[f64; N]) -> Result<Self::Input, Self::Error>;

    /// Scores a model call.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the call has no meaningful score, such as a
    /// simulation that failed before producing the observable.
    fn objective(&self, input: &Self::Input, output: &Self::Output) -> Result<f64, Self::Error>;
}
