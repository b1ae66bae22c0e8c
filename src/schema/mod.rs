//! Schema module - Vehicle, configuration and result types for EV optimisation.

mod config;
mod optimisation;
mod result;
mod vehicle;

pub use config::*;
pub use optimisation::*;
pub use result::*;
pub use vehicle::*;
