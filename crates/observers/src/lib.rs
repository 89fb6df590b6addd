//! Reusable observers for modsim solvers and drivers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across the solvers in `modsim-solvers`.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasPosition`], [`HasResidual`], [`HasObjective`], [`CanStopEarly`],
//!   [`CanAssumeWorse`])
//!
//! # Observers
//!
//! - [`Tracer`] — logs every event through `tracing`
//! - [`History`] — records where each event happened
//! - [`StopAfter`] — stops a solver after a fixed number of events
//!
//! [`Observer`]: modsim_core::Observer
//! [`HasPosition`]: traits::HasPosition
//! [`HasResidual`]: traits::HasResidual
//! [`HasObjective`]: traits::HasObjective
//! [`CanStopEarly`]: traits::CanStopEarly
//! [`CanAssumeWorse`]: traits::CanAssumeWorse

pub mod traits;

mod history;
mod stop_after;
mod tracer;

pub use history::History;
pub use stop_after::StopAfter;
pub use tracer::Tracer;

#[cfg(test)]
mod fixtures;
