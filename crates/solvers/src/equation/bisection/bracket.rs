use thiserror::Error;

/// Reasons a bracket cannot be used for bisection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BracketError {
    #[error("non-finite endpoint")]
    NonFinite,

    #[error("zero width")]
    ZeroWidth,

    #[error("residual does not change sign between the endpoints")]
    NoSignChange,
}

/// The residual sign used to decide which half of the bracket to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// Zero or greater.
    Positive,
    Negative,
}

impl Sign {
    /// Returns the sign of a residual, counting zero as positive.
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

/// An interval whose endpoint residuals have opposite signs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    left: f64,
    right: f64,
    left_sign: Sign,
    right_sign: Sign,
}

impl Bracket {
    /// Pairs validated bounds with their endpoint signs.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NoSignChange`] if both signs are equal.
    pub(super) fn new(
        bounds: Bounds,
        left_sign: Sign,
        right_sign: Sign,
    ) -> Result<Self, BracketError> {
        if left_sign == right_sign {
            return Err(BracketError::NoSignChange);
        }

        Ok(Self {
            left: bounds.left,
            right: bounds.right,
            left_sign,
            right_sign,
        })
    }

    /// Returns `[left, right]`.
    #[must_use]
    pub fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }

    /// Returns the residual signs at `[left, right]`.
    #[must_use]
    pub fn signs(&self) -> [Sign; 2] {
        [self.left_sign, self.right_sign]
    }

    #[must_use]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.left + self.right)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Returns true if the width is within `x_abs_tol + x_rel_tol * |midpoint|`.
    #[must_use]
    pub fn is_x_converged(&self, x_abs_tol: f64, x_rel_tol: f64) -> bool {
        self.width() <= x_abs_tol + x_rel_tol * self.midpoint().abs()
    }

    /// Replaces the endpoint that shares `sign` with `x`.
    pub(super) fn shrink(&mut self, x: f64, sign: Sign) {
        if sign == self.left_sign {
            self.left = x;
        } else {
            self.right = x;
            self.right_sign = sign;
        }
    }
}

/// Finite, ordered endpoints that have not been evaluated yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bounds {
    left: f64,
    right: f64,
}

impl Bounds {
    /// Validates the endpoints and puts them in increasing order.
    ///
    /// # Errors
    ///
    /// Returns [`BracketError::NonFinite`] or [`BracketError::ZeroWidth`].
    pub(super) fn new(bracket: [f64; 2]) -> Result<Self, BracketError> {
        let [a, b] = bracket;

        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite);
        }

        #[allow(clippy::float_cmp)]
        if a == b {
            return Err(BracketError::ZeroWidth);
        }

        Ok(Self {
            left: a.min(b),
            right: a.max(b),
        })
    }

    pub(super) fn as_array(&self) -> [f64; 2] {
        [self.left, self.right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn bounds_are_ordered() {
        let [left, right] = Bounds::new([3.0, 1.0]).expect("valid bounds").as_array();
        assert_relative_eq!(left, 1.0);
        assert_relative_eq!(right, 3.0);
    }

    #[test]
    fn bounds_reject_bad_endpoints() {
        assert_eq!(Bounds::new([f64::NAN, 1.0]), Err(BracketError::NonFinite));
        assert_eq!(
            Bounds::new([0.0, f64::NEG_INFINITY]),
            Err(BracketError::NonFinite)
        );
        assert_eq!(Bounds::new([2.0, 2.0]), Err(BracketError::ZeroWidth));
    }

    #[test]
    fn same_signs_do_not_bracket() {
        let bounds = Bounds::new([0.0, 1.0]).expect("valid bounds");
        assert_eq!(
            Bracket::new(bounds, Sign::Negative, Sign::Negative),
            Err(BracketError::NoSignChange)
        );
    }

    #[test]
    fn shrink_replaces_matching_endpoint() {
        let bounds = Bounds::new([0.0, 2.0]).expect("valid bounds");
        let mut bracket =
            Bracket::new(bounds, Sign::Negative, Sign::Positive).expect("valid bracket");

        bracket.shrink(1.0, Sign::Negative);
        assert_eq!(bracket.as_array(), [1.0, 2.0]);

        bracket.shrink(1.5, Sign::Positive);
        assert_eq!(bracket.as_array(), [1.0, 1.5]);
        assert_relative_eq!(bracket.width(), 0.5);
        assert_relative_eq!(bracket.midpoint(), 1.25);
    }

    #[test]
    fn convergence_uses_absolute_and_relative_width() {
        let bounds = Bounds::new([100.0, 100.5]).expect("valid bounds");
        let bracket =
            Bracket::new(bounds, Sign::Positive, Sign::Negative).expect("valid bracket");

        assert!(!bracket.is_x_converged(0.1, 0.0));
        assert!(bracket.is_x_converged(0.0, 0.01));
        assert!(bracket.is_x_converged(0.5, 0.0));
    }
}
