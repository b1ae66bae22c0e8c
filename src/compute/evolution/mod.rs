//! NSGA-II evolutionary search over vehicle designs.
//!
//! # Overview
//!
//! - **Operators** (`operators`): random generation, SBX / BLX-α crossover and
//!   polynomial mutation, all driven by one seeded [`VehicleRng`]
//! - **Sorting** (`sorting`): Pareto dominance, non-dominated fronts and
//!   crowding distance
//! - **Engine** (`engine`): tournament selection, offspring generation,
//!   environmental selection and the generational loop
//!
//! # Example
//!
//! ```rust,no_run
//! use ev_optimisation::schema::OptimisationConfig;
//! use ev_optimisation::compute::evolution::NsgaEngine;
//!
//! let config = OptimisationConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = NsgaEngine::new(config)?;
//! let result = engine.run_with_callback(|generation| {
//!     println!("Generation {}: {} on the first front",
//!         generation.generation, generation.pareto_front().len());
//! })?;
//!
//! println!("Recorded {} generations", result.generations.len());
//! # Ok::<(), ev_optimisation::compute::evolution::OptimisationError>(())
//! ```

mod engine;
mod operators;
mod sorting;

pub use engine::{
    NsgaEngine, OptimisationError, evaluate_generation, generate_offspring,
    optimise_ev_population, propagate_species, tournament_select,
};
pub use operators::{
    OperatorError, VehicleRng, blx_alpha_bounds, polynomial_step, sbx_beta, sbx_children,
};
pub use sorting::{assign_fronts, crowding_distance, dominates, flatten_fronts};
