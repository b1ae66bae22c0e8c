//! Genetic operators for vehicle designs.
//!
//! Provides random generation, crossover (SBX, BLX-α) and polynomial mutation.
//! All randomness flows through one seeded [`VehicleRng`].

use rand::prelude::*;
use rand_distr::Open01;

use crate::schema::{
    BATTERY_CAPACITY_BOUNDS, CrossoverStrategy, MOTOR_POWER_BOUNDS, Vehicle, round_dp,
};

/// Genetic operator errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperatorError {
    #[error("Mutation rate must be in range [0, 1]. Given: {0}")]
    InvalidMutationRate(f64),
}

/// Random number generator wrapper for vehicle operations.
///
/// The engine owns exactly one of these per run; seeding it once makes the
/// whole run reproducible.
pub struct VehicleRng {
    rng: StdRng,
}

impl VehicleRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate a random vehicle with genes uniform in their bounds,
    /// rounded to 2 decimals.
    pub fn random_vehicle(&mut self) -> Vehicle {
        let power = round_dp(self.uniform(MOTOR_POWER_BOUNDS), 2);
        let capacity = round_dp(self.uniform(BATTERY_CAPACITY_BOUNDS), 2);
        Vehicle::new(power, capacity)
    }

    /// Generate `size` random vehicles.
    pub fn random_population(&mut self, size: usize) -> Vec<Vehicle> {
        (0..size).map(|_| self.random_vehicle()).collect()
    }

    /// Uniform random in bounds.
    fn uniform(&mut self, bounds: (f64, f64)) -> f64 {
        self.rng.gen_range(bounds.0..=bounds.1)
    }

    /// Bernoulli trial with probability `p` in [0, 1].
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// Two distinct indices drawn uniformly from `0..n` without replacement.
    ///
    /// Panics if `n < 2`.
    pub fn distinct_pair(&mut self, n: usize) -> (usize, usize) {
        let picked = rand::seq::index::sample(&mut self.rng, n, 2);
        (picked.index(0), picked.index(1))
    }

    /// Polynomial mutation of one gene.
    pub fn polynomial_mutation(&mut self, value: f64, bounds: (f64, f64), eta: f64) -> f64 {
        let u: f64 = self.rng.sample(Open01);
        polynomial_step(value, bounds, eta, u)
    }

    /// Mutate each gene independently with probability `rate`.
    ///
    /// Returns a new vehicle; `rate = 0` returns the genes unchanged.
    pub fn mutate(
        &mut self,
        vehicle: &Vehicle,
        rate: f64,
        eta: f64,
    ) -> Result<Vehicle, OperatorError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(OperatorError::InvalidMutationRate(rate));
        }

        let mut power = vehicle.motor_power();
        let mut capacity = vehicle.battery_capacity();

        if self.chance(rate) {
            power = self.polynomial_mutation(power, MOTOR_POWER_BOUNDS, eta);
        }
        if self.chance(rate) {
            capacity = self.polynomial_mutation(capacity, BATTERY_CAPACITY_BOUNDS, eta);
        }

        Ok(Vehicle::new(power, capacity))
    }

    /// Simulated binary crossover.
    ///
    /// One spread factor is drawn per call and shared by both genes.
    pub fn sbx_crossover(&mut self, p1: &Vehicle, p2: &Vehicle, eta: f64) -> (Vehicle, Vehicle) {
        let u = self.rng.r#gen::<f64>();
        sbx_children(p1, p2, sbx_beta(u, eta))
    }

    /// BLX-α for one gene: uniform in the parents' range widened by `alpha`.
    pub fn blx_alpha(&mut self, gene_1: f64, gene_2: f64, alpha: f64) -> f64 {
        self.uniform(blx_alpha_bounds(gene_1, gene_2, alpha))
    }

    /// BLX-α crossover producing two independently drawn children.
    pub fn blx_crossover(&mut self, p1: &Vehicle, p2: &Vehicle, alpha: f64) -> (Vehicle, Vehicle) {
        let mut child = || {
            Vehicle::new(
                self.blx_alpha(p1.motor_power(), p2.motor_power(), alpha),
                self.blx_alpha(p1.battery_capacity(), p2.battery_capacity(), alpha),
            )
        };
        let c1 = child();
        let c2 = child();
        (c1, c2)
    }

    /// Perform crossover between two parents with the configured strategy.
    pub fn crossover(
        &mut self,
        p1: &Vehicle,
        p2: &Vehicle,
        strategy: &CrossoverStrategy,
    ) -> (Vehicle, Vehicle) {
        match *strategy {
            CrossoverStrategy::Sbx { eta } => self.sbx_crossover(p1, p2, eta),
            CrossoverStrategy::BlxAlpha { alpha } => self.blx_crossover(p1, p2, alpha),
        }
    }
}

/// Deterministic part of polynomial mutation for a draw `u` in (0, 1).
pub fn polynomial_step(value: f64, bounds: (f64, f64), eta: f64, u: f64) -> f64 {
    let exponent = 1.0 / (1.0 + eta);
    let delta = if u < 0.5 {
        (2.0 * u).powf(exponent) - 1.0
    } else {
        1.0 - (2.0 * (1.0 - u)).powf(exponent)
    };
    (value + delta * (bounds.1 - bounds.0)).clamp(bounds.0, bounds.1)
}

/// SBX spread factor for a draw `u` in [0, 1).
pub fn sbx_beta(u: f64, eta: f64) -> f64 {
    if u <= 0.5 {
        (2.0 * u).powf(1.0 / (eta + 1.0))
    } else {
        (2.0 * (1.0 - u)).powf(-1.0 / (eta + 1.0))
    }
}

/// SBX children for a given spread factor, applied to both genes.
///
/// Swapping the parents swaps the children.
pub fn sbx_children(p1: &Vehicle, p2: &Vehicle, beta: f64) -> (Vehicle, Vehicle) {
    let [a1, b1] = p1.to_array();
    let [a2, b2] = p2.to_array();
    let blend = |x1: f64, x2: f64| {
        (
            0.5 * ((1.0 + beta) * x1 + (1.0 - beta) * x2),
            0.5 * ((1.0 - beta) * x1 + (1.0 + beta) * x2),
        )
    };
    let (power_1, power_2) = blend(a1, a2);
    let (capacity_1, capacity_2) = blend(b1, b2);
    (
        Vehicle::new(power_1, capacity_1),
        Vehicle::new(power_2, capacity_2),
    )
}

/// Sampling interval of BLX-α for two parent genes.
pub fn blx_alpha_bounds(gene_1: f64, gene_2: f64, alpha: f64) -> (f64, f64) {
    let spread = (gene_1 - gene_2).abs() * alpha;
    (gene_1.min(gene_2) - spread, gene_1.max(gene_2) + spread)
}
