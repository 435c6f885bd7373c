//! Simulation layer.
//!
//! # Components
//! - [`SimulationDriver`] - One replacer over one trace
//! - [`SweepRunner`] - Every (capacity, policy) pair over a range
//! - [`AccessStats`] / [`SimulationResult`] - Hit/miss accounting

mod driver;
mod stats;
mod sweep;

pub use driver::SimulationDriver;
pub use stats::{AccessStats, SimulationResult};
pub use sweep::{Sweep, SweepPoint, SweepRunner};
