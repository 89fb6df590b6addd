//! Interpolated external signals.
//!
//! A [`Signal`] turns sampled data, such as measured plasma insulin over
//! time, into a function of time that a derivative can call. Linear and the
//! nearest-sample kinds are backed by `ninterp`; natural cubic splines and
//! global polynomials are built here.

mod error;
mod extrapolate;
mod polynomial;
mod signal;
mod spline;

pub use error::InterpError;
pub use extrapolate::Extrapolate;
pub use signal::{Kind, Signal};
