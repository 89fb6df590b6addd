/// A fixed-shape record of named scalars describing a system at an instant.
///
/// Implementing this trait lets a plain struct (`{ y, v }`, `{ glucose,
/// insulin_action }`, ...) act as the state of an ODE problem. Solvers work on
/// a flat `f64` view and convert back at every boundary, so the field order
/// defined by [`NAMES`](State::NAMES), [`write_to`](State::write_to), and
/// [`from_slice`](State::from_slice) must agree.
///
/// The same type is used for the derivative: a derivative function returns a
/// `Self` whose fields hold the rate of change of the matching state fields.
///
/// # Example
///
/// ```
/// use modsim_core::State;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Fall {
///     y: f64,
///     v: f64,
/// }
///
/// impl State for Fall {
///     const NAMES: &'static [&'static str] = &["y", "v"];
///
///     fn write_to(&self, out: &mut [f64]) {
///         out.copy_from_slice(&[self.y, self.v]);
///     }
///
///     fn from_slice(values: &[f64]) -> Self {
///         Self { y: values[0], v: values[1] }
///     }
/// }
///
/// assert_eq!(Fall::dim(), 2);
/// assert_eq!(Fall::index_of("v"), Some(1));
/// assert_eq!(Fall { y: 3.0, v: -1.0 }.to_vec(), vec![3.0, -1.0]);
/// ```
pub trait State: Copy {
    /// Field names, in slice order.
    const NAMES: &'static [&'static str];

    /// Writes the field values into `out` in [`NAMES`](State::NAMES) order.
    ///
    /// `out.len()` always equals [`dim`](State::dim).
    fn write_to(&self, out: &mut [f64]);

    /// Builds a value from field values in [`NAMES`](State::NAMES) order.
    ///
    /// `values.len()` always equals [`dim`](State::dim).
    fn from_slice(values: &[f64]) -> Self;

    /// Returns the number of fields.
    #[must_use]
    fn dim() -> usize {
        Self::NAMES.len()
    }

    /// Returns the field values as a vector.
    #[must_use]
    fn to_vec(&self) -> Vec<f64> {
        let mut out = vec![0.0; Self::dim()];
        self.write_to(&mut out);
        out
    }

    /// Returns the index of a named field.
    #[must_use]
    fn index_of(name: &str) -> Option<usize> {
        Self::NAMES.iter().position(|n| *n == name)
    }

    /// Returns true if every field is finite.
    #[must_use]
    fn is_finite(&self) -> bool {
        self.to_vec().iter().all(|v| v.is_finite())
    }
}
