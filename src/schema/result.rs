//! Per-generation snapshots produced by the optimiser.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Vehicle, round_dp};

/// Objective vector of one individual: `[-range_km, acceleration_time_s]`.
///
/// Both entries are minimised.
pub type Objectives = [f64; 2];

/// State of the population at one generation, captured before breeding.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    /// Generation index (0 = initial population).
    pub generation: usize,
    /// Population at this generation.
    pub population: Vec<Vehicle>,
    /// Front number per individual, starting at 1.
    pub fronts: Vec<usize>,
    /// Objective row per individual.
    pub objectives: Vec<Objectives>,
    /// Crowding distance per individual (infinite on objective boundaries).
    pub distances: Vec<f64>,
}

impl GenerationResult {
    /// Number of individuals in the snapshot.
    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    /// Highest front number present.
    pub fn front_count(&self) -> usize {
        self.fronts.iter().copied().max().unwrap_or(0)
    }

    /// Vehicles on the first (non-dominated) front, in population order.
    pub fn pareto_front(&self) -> Vec<Vehicle> {
        self.population
            .iter()
            .zip(&self.fronts)
            .filter(|(_, front)| **front == 1)
            .map(|(vehicle, _)| *vehicle)
            .collect()
    }

    /// Flatten into one table row per individual.
    pub fn rows(&self) -> Vec<ResultRow> {
        self.population
            .iter()
            .enumerate()
            .map(|(i, vehicle)| {
                let distance = self.distances[i];
                ResultRow {
                    generation: self.generation,
                    motor_power: vehicle.motor_power(),
                    battery_capacity: vehicle.battery_capacity(),
                    mass: vehicle.mass(),
                    front: self.fronts[i],
                    crowding_distance: distance.is_finite().then_some(distance),
                    range_km: -self.objectives[i][0],
                    time_s: self.objectives[i][1],
                }
            })
            .collect()
    }
}

/// One individual of one generation in tabular form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub generation: usize,
    /// Motor power in kW.
    pub motor_power: f64,
    /// Battery capacity in kWh.
    pub battery_capacity: f64,
    /// Mass in kg.
    pub mass: f64,
    pub front: usize,
    /// Crowding distance; `None` for boundary individuals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowding_distance: Option<f64>,
    /// Range in km (positive).
    pub range_km: f64,
    /// 0-100 km/h time in seconds.
    pub time_s: f64,
}

impl ResultRow {
    /// Reduced-precision copy for transport: values rounded to 2 decimals,
    /// range to whole kilometres, crowding distance dropped.
    pub fn compact(&self) -> Self {
        Self {
            generation: self.generation,
            motor_power: round_dp(self.motor_power, 2),
            battery_capacity: round_dp(self.battery_capacity, 2),
            mass: round_dp(self.mass, 2),
            front: self.front,
            crowding_distance: None,
            range_km: round_dp(self.range_km, 0),
            time_s: round_dp(self.time_s, 2),
        }
    }
}

/// Summary statistics of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Number of bred generations (excluding the initial one).
    pub generations: usize,
    /// Individuals per generation.
    pub population_size: usize,
    /// Total objective evaluations performed.
    pub evaluations: u64,
    /// Wall-clock time in seconds.
    pub elapsed_seconds: f64,
}

/// Full result of an optimisation run.
#[derive(Debug, Clone, Serialize)]
pub struct OptimisationResult {
    /// Snapshots keyed by generation index, in generation order.
    pub generations: BTreeMap<usize, GenerationResult>,
    pub stats: RunStats,
}

impl OptimisationResult {
    /// Snapshot of the last recorded generation.
    pub fn final_generation(&self) -> Option<&GenerationResult> {
        self.generations.values().next_back()
    }

    /// Rows of every generation, concatenated in generation order.
    pub fn table(&self) -> Vec<ResultRow> {
        self.generations
            .values()
            .flat_map(GenerationResult::rows)
            .collect()
    }
}
