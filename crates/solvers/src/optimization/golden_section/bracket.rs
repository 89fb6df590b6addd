use super::{Error, solution::Bound};

/// The golden ratio φ = (1 + √5) / 2.
const PHI: f64 = 1.618_033_988_749_895;

/// 1/φ, which equals φ - 1.
const INV_PHI: f64 = PHI - 1.0;

/// The outer interval `[left, right]` and its two golden-ratio interior points.
///
/// The original bounds are kept so the solver can tell whether an end of the
/// bracket has never moved.
#[derive(Debug, Clone, Copy)]
pub(super) struct GoldenBracket {
    lower: f64,
    upper: f64,
    pub(super) left: f64,
    pub(super) right: f64,
    pub(super) inner_left: f64,
    pub(super) inner_right: f64,
}

impl GoldenBracket {
    /// Orders the bounds and places the interior points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBracket`] if a bound is non-finite or both are equal.
    pub(super) fn new(bounds: [f64; 2]) -> Result<Self, Error> {
        let [a, b] = bounds;
        #[allow(clippy::float_cmp)]
        if !a.is_finite() || !b.is_finite() || a == b {
            return Err(Error::InvalidBracket { a, b });
        }

        let (left, right) = (a.min(b), a.max(b));
        let width = right - left;
        Ok(Self {
            lower: left,
            upper: right,
            left,
            right,
            inner_left: left + (1.0 - INV_PHI) * width,
            inner_right: left + INV_PHI * width,
        })
    }

    pub(super) fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Keeps `[left, inner_right]` and returns the new `inner_left` to evaluate.
    ///
    /// The old `inner_left` becomes the new `inner_right`.
    pub(super) fn shrink_right(&mut self) -> f64 {
        self.right = self.inner_right;
        self.inner_right = self.inner_left;
        self.inner_left = self.left + (1.0 - INV_PHI) * self.width();
        self.inner_left
    }

    /// Keeps `[inner_left, right]` and returns the new `inner_right` to evaluate.
    ///
    /// The old `inner_right` becomes the new `inner_left`.
    pub(super) fn shrink_left(&mut self) -> f64 {
        self.left = self.inner_left;
        self.inner_left = self.inner_right;
        self.inner_right = self.left + INV_PHI * self.width();
        self.inner_right
    }

    /// Returns true once the interior points are within tolerance of each other.
    pub(super) fn is_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        let gap = (self.inner_right - self.inner_left).abs();
        let mid = 0.5 * (self.inner_left + self.inner_right);
        gap <= x_abs_tol + x_rel_tol * mid.abs()
    }

    /// Returns the original bounds that are still ends of the bracket.
    #[allow(clippy::float_cmp)]
    pub(super) fn anchored(&self) -> impl Iterator<Item = (Bound, f64)> {
        let lower = (self.left == self.lower).then_some((Bound::Lower, self.lower));
        let upper = (self.right == self.upper).then_some((Bound::Upper, self.upper));
        lower.into_iter().chain(upper)
    }
}
