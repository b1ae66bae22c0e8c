//! Compute module - Physics, objective evaluation and NSGA-II search.

mod objective;
mod physics;

pub mod evolution;

pub use objective::*;
pub use physics::*;
