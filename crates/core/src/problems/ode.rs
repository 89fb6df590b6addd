use std::fmt;

use crate::State;

/// Defines an ODE (ordinary differential equation) problem to be solved.
///
/// The implementing type is the parameter record of a simulation: it holds
/// the physical constants, the initial state, and the time span, and it
/// exposes the derivative and event functions that read them. Solvers only
/// ever borrow the record immutably, so a single record can back any number
/// of independent runs.
///
/// # Derivative contract
///
/// [`derivative`](OdeProblem::derivative) must be pure. Adaptive solvers call
/// it at trial points that may later be rejected and in no particular time
/// order. If the model is undefined somewhere the solver might probe, pair it
/// with a terminal [`Event`] that stops integration before the domain is
/// exited, or return an error, which solvers treat as fatal.
pub trait OdeProblem {
    type State: State;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the state at the start of the time span.
    fn initial_state(&self) -> Self::State;

    /// Returns the integration interval.
    fn time_span(&self) -> TimeSpan;

    /// Computes the rate of change of each state field at time `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative is undefined at `(t, state)`.
    fn derivative(&self, t: f64, state: &Self::State) -> Result<Self::State, Self::Error>;

    /// Returns the event functions monitored during integration.
    ///
    /// The default implementation registers no events.
    fn events(&self) -> Vec<Event<'_, Self::State>> {
        Vec::new()
    }
}

/// The interval over which an ODE problem is integrated.
///
/// `end` may be less than `start`, in which case integration runs backward.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSpan {
    pub start: f64,
    pub end: f64,
}

impl TimeSpan {
    /// Creates a time span from `start` to `end`.
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Returns `end - start`.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `1.0` for forward integration and `-1.0` for backward.
    #[must_use]
    pub fn direction(&self) -> f64 {
        if self.end >= self.start { 1.0 } else { -1.0 }
    }

    /// Returns true if both endpoints are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }

    /// Returns true if `t` lies within the span, endpoints included.
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        (lo..=hi).contains(&t)
    }
}

/// Which zero crossings of an event function count as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// The function goes from negative to non-negative.
    Rising,
    /// The function goes from positive to non-positive.
    Falling,
    /// Either of the above.
    Either,
}

impl Direction {
    /// Returns true if going from `before` to `after` is a crossing in this direction.
    ///
    /// A function that starts exactly at zero has not crossed; it must first
    /// leave zero.
    #[must_use]
    pub fn is_crossing(self, before: f64, after: f64) -> bool {
        let rising = before < 0.0 && after >= 0.0;
        let falling = before > 0.0 && after <= 0.0;
        match self {
            Direction::Rising => rising,
            Direction::Falling => falling,
            Direction::Either => rising || falling,
        }
    }
}

type EventFn<'a, S> = dyn Fn(f64, &S) -> f64 + 'a;

/// A registered event function.
///
/// The function returns a scalar whose zero crossing marks the event; only
/// the sign matters. Both [`direction`](Event::direction) and whether the
/// event is terminal are required at registration.
///
/// # Example
///
/// ```
/// use modsim_core::{Direction, Event};
///
/// // Stop when the first state field (height) reaches zero from above.
/// let ground = Event::terminal("ground", Direction::Falling, |_t, s: &[f64; 2]| s[0]);
///
/// assert!(ground.is_terminal());
/// assert_eq!(ground.value(0.0, &[3.0, 0.0]), 3.0);
/// ```
pub struct Event<'a, S> {
    name: &'static str,
    direction: Direction,
    terminal: bool,
    function: Box<EventFn<'a, S>>,
}

impl<'a, S> Event<'a, S> {
    /// Registers an event function with explicit direction and terminal flag.
    pub fn new<F>(name: &'static str, direction: Direction, terminal: bool, function: F) -> Self
    where
        F: Fn(f64, &S) -> f64 + 'a,
    {
        Self {
            name,
            direction,
            terminal,
            function: Box::new(function),
        }
    }

    /// Registers an event that stops integration when it fires.
    pub fn terminal<F>(name: &'static str, direction: Direction, function: F) -> Self
    where
        F: Fn(f64, &S) -> f64 + 'a,
    {
        Self::new(name, direction, true, function)
    }

    /// Registers an event that is recorded while integration continues.
    pub fn recorded<F>(name: &'static str, direction: Direction, function: F) -> Self
    where
        F: Fn(f64, &S) -> f64 + 'a,
    {
        Self::new(name, direction, false, function)
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns which crossings count.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns true if the event stops integration.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Evaluates the event function.
    pub fn value(&self, t: f64, state: &S) -> f64 {
        (self.function)(t, state)
    }
}

impl<S> fmt::Debug for Event<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("direction", &self.direction)
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}
