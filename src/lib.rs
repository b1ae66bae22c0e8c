//! EV Optimisation - Multi-objective design search for electric vehicles.
//!
//! This crate evolves electric-vehicle designs (motor power, battery
//! capacity) with NSGA-II to expose the trade-off between driving range and
//! 0-100 km/h acceleration time.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Vehicle, configuration and per-generation result types
//! - `compute`: Physics model, objective evaluation and the NSGA-II engine
//!
//! # Example
//!
//! ```rust,no_run
//! use ev_optimisation::{NsgaEngine, OptimisationConfig, PopulationConfig};
//!
//! let config = OptimisationConfig {
//!     population: PopulationConfig {
//!         size: Some(20),
//!         generations: 10,
//!     },
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let result = NsgaEngine::new(config)?.run()?;
//! if let Some(last) = result.final_generation() {
//!     for vehicle in last.pareto_front() {
//!         println!("{vehicle}");
//!     }
//! }
//! # Ok::<(), ev_optimisation::OptimisationError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{NsgaEngine, OptimisationError, optimise_ev_population};
pub use schema::{
    GenerationResult, OptimisationConfig, OptimisationResult, PopulationConfig, Vehicle,
    VehicleConfig,
};
