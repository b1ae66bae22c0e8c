//! NSGA-II engine: evaluation, ranking, breeding and survivor selection.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::time::Instant;

use log::{debug, info};

use super::operators::{OperatorError, VehicleRng};
use super::sorting::{assign_fronts, crowding_distance, flatten_fronts};
use crate::compute::objective::evaluate_population;
use crate::compute::physics::PhysicsError;
use crate::schema::{
    GenerationResult, OperatorConfig, OptimisationConfig, OptimisationConfigError,
    OptimisationResult, RunStats, Vehicle, VehicleConfig, validate_population_size,
};

/// Errors that abort an optimisation run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimisationError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] OptimisationConfigError),
    #[error("Objective evaluation failed: {0}")]
    Physics(#[from] PhysicsError),
    #[error("Genetic operator failed: {0}")]
    Operator(#[from] OperatorError),
}

/// Binary tournament: two distinct individuals, lower front wins, then
/// larger crowding distance; a full tie goes to the first one drawn.
pub fn tournament_select(rng: &mut VehicleRng, fronts: &[usize], distances: &[f64]) -> usize {
    let (a, b) = rng.distinct_pair(fronts.len());
    let a_wins = match fronts[a].cmp(&fronts[b]) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => distances[a] >= distances[b],
    };
    if a_wins { a } else { b }
}

/// Breed a full offspring population.
///
/// A mating pool of the population's size is filled by tournament, then
/// consecutive pairs either cross over (with probability `crossover_rate`) or
/// pass through unchanged, and every child goes through mutation.
pub fn generate_offspring(
    rng: &mut VehicleRng,
    population: &[Vehicle],
    fronts: &[usize],
    distances: &[f64],
    operators: &OperatorConfig,
) -> Result<Vec<Vehicle>, OperatorError> {
    let n = population.len();

    let mating_pool: Vec<Vehicle> = (0..n)
        .map(|_| population[tournament_select(rng, fronts, distances)])
        .collect();

    let mut offspring = Vec::with_capacity(n);
    for pair in mating_pool.chunks_exact(2) {
        let (c1, c2) = if rng.chance(operators.crossover_rate) {
            rng.crossover(&pair[0], &pair[1], &operators.crossover)
        } else {
            (pair[0], pair[1])
        };

        offspring.push(rng.mutate(&c1, operators.mutation_rate, operators.mutation_eta)?);
        offspring.push(rng.mutate(&c2, operators.mutation_rate, operators.mutation_eta)?);
    }

    assert_eq!(offspring.len(), n, "offspring size must match population size");
    Ok(offspring)
}

/// Environmental selection.
///
/// Merges parents and offspring, ranks the merged population by front then
/// crowding distance (descending) and keeps the best `parents.len()`.
pub fn propagate_species(
    parents: Vec<Vehicle>,
    offspring: Vec<Vehicle>,
    config: &VehicleConfig,
) -> Result<Vec<Vehicle>, PhysicsError> {
    assert_eq!(
        parents.len(),
        offspring.len(),
        "parent and offspring populations must be the same size"
    );
    let survivors = parents.len();

    let mut merged = parents;
    merged.extend(offspring);

    let objectives = evaluate_population(&merged, config)?;
    let fronts = flatten_fronts(&assign_fronts(&objectives), merged.len());
    let distances = crowding_distance(&objectives);

    let mut order: Vec<usize> = (0..merged.len()).collect();
    order.sort_by(|&a, &b| {
        fronts[a]
            .cmp(&fronts[b])
            .then_with(|| distances[b].total_cmp(&distances[a]))
    });

    Ok(order
        .into_iter()
        .take(survivors)
        .map(|i| merged[i])
        .collect())
}

/// Evaluate and rank a population into a generation snapshot.
pub fn evaluate_generation(
    generation: usize,
    population: Vec<Vehicle>,
    config: &VehicleConfig,
) -> Result<GenerationResult, PhysicsError> {
    let objectives = evaluate_population(&population, config)?;
    let fronts = flatten_fronts(&assign_fronts(&objectives), population.len());
    let distances = crowding_distance(&objectives);

    Ok(GenerationResult {
        generation,
        population,
        fronts,
        objectives,
        distances,
    })
}

/// NSGA-II optimisation engine.
pub struct NsgaEngine {
    config: OptimisationConfig,
    rng: VehicleRng,
    initial_population: Option<Vec<Vehicle>>,
}

impl NsgaEngine {
    /// Create a new engine, validating the configuration up front.
    pub fn new(config: OptimisationConfig) -> Result<Self, OptimisationError> {
        config.validate()?;

        let rng = match config.random_seed {
            Some(seed) => VehicleRng::new(seed),
            None => VehicleRng::random(),
        };

        Ok(Self {
            config,
            rng,
            initial_population: None,
        })
    }

    /// Start from a caller-supplied population instead of a random one.
    ///
    /// The configured population size is ignored in favour of its length.
    pub fn with_initial_population(
        mut self,
        population: Vec<Vehicle>,
    ) -> Result<Self, OptimisationError> {
        validate_population_size(population.len())?;
        self.initial_population = Some(population);
        Ok(self)
    }

    pub fn config(&self) -> &OptimisationConfig {
        &self.config
    }

    /// Build generation 0.
    fn initialize(&mut self) -> Result<Vec<Vehicle>, OptimisationError> {
        if let Some(population) = &self.initial_population {
            return Ok(population.clone());
        }
        let size = self
            .config
            .population
            .size
            .ok_or(OptimisationConfigError::MissingPopulationSize)?;
        validate_population_size(size)?;
        Ok(self.rng.random_population(size))
    }

    /// Run the optimisation, calling `callback` with every generation as soon
    /// as it is recorded.
    pub fn run_with_callback<F>(
        &mut self,
        mut callback: F,
    ) -> Result<OptimisationResult, OptimisationError>
    where
        F: FnMut(&GenerationResult),
    {
        let start_time = Instant::now();

        let mut population = self.initialize()?;
        let population_size = population.len();
        let max_generations = self.config.population.generations;

        info!(
            "Starting NSGA-II run: {} individuals, {} generations",
            population_size, max_generations
        );

        let mut generations = BTreeMap::new();
        let mut evaluations = 0u64;
        let mut generation = 0;

        loop {
            let snapshot = evaluate_generation(generation, population, &self.config.vehicle)?;
            evaluations += population_size as u64;

            log_generation(&snapshot);
            callback(&snapshot);

            if generation == max_generations {
                generations.insert(generation, snapshot);
                break;
            }

            let offspring = generate_offspring(
                &mut self.rng,
                &snapshot.population,
                &snapshot.fronts,
                &snapshot.distances,
                &self.config.operators,
            )?;
            population =
                propagate_species(snapshot.population.clone(), offspring, &self.config.vehicle)?;
            evaluations += 2 * population_size as u64;

            generations.insert(generation, snapshot);
            generation += 1;
        }

        let elapsed = start_time.elapsed().as_secs_f64();
        info!(
            "NSGA-II run finished: {} evaluations in {:.3}s",
            evaluations, elapsed
        );

        Ok(OptimisationResult {
            generations,
            stats: RunStats {
                generations: max_generations,
                population_size,
                evaluations,
                elapsed_seconds: elapsed,
            },
        })
    }

    /// Run the optimisation (blocking).
    pub fn run(&mut self) -> Result<OptimisationResult, OptimisationError> {
        self.run_with_callback(|_| {})
    }
}

fn log_generation(snapshot: &GenerationResult) {
    let best_range = snapshot
        .objectives
        .iter()
        .map(|o| -o[0])
        .fold(f64::NEG_INFINITY, f64::max);
    let best_time = snapshot
        .objectives
        .iter()
        .map(|o| o[1])
        .fold(f64::INFINITY, f64::min);

    debug!(
        "Generation {}: {} fronts, {} non-dominated, best range {:.1} km, best 0-100 {:.2} s",
        snapshot.generation,
        snapshot.front_count(),
        snapshot.pareto_front().len(),
        best_range,
        best_time
    );
}

/// Run NSGA-II with `config`, optionally from an explicit initial population.
pub fn optimise_ev_population(
    config: OptimisationConfig,
    initial_population: Option<Vec<Vehicle>>,
) -> Result<OptimisationResult, OptimisationError> {
    let mut engine = NsgaEngine::new(config)?;
    if let Some(population) = initial_population {
        engine = engine.with_initial_population(population)?;
    }
    engine.run()
}
