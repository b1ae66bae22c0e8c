//! Optimisation run configuration.
//!
//! Everything the NSGA-II engine needs for one run: the fixed vehicle
//! physics, population/generation settings, operator settings and seed.

use serde::{Deserialize, Serialize};

use super::{ConfigError, VehicleConfig};

/// Top-level configuration for an optimisation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimisationConfig {
    /// Fixed vehicle physics shared by all evaluations.
    #[serde(default)]
    pub vehicle: VehicleConfig,
    /// Population and generation settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Crossover and mutation settings.
    #[serde(default)]
    pub operators: OperatorConfig,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for OptimisationConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleConfig::default(),
            population: PopulationConfig::default(),
            operators: OperatorConfig::default(),
            random_seed: None,
        }
    }
}

/// Population and generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals. May be omitted when an initial population is
    /// supplied to the engine, in which case its length is used.
    #[serde(default = "default_population_size")]
    pub size: Option<usize>,
    /// Number of generations to breed after the initial one.
    #[serde(default = "default_generations")]
    pub generations: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            generations: default_generations(),
        }
    }
}

fn default_population_size() -> Option<usize> {
    Some(50)
}
fn default_generations() -> usize {
    20
}

/// Crossover strategy used when breeding a pair of parents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CrossoverStrategy {
    /// Simulated binary crossover with one shared spread factor per pair.
    Sbx {
        /// Distribution index; higher keeps children closer to parents.
        #[serde(default = "default_sbx_eta")]
        eta: f64,
    },
    /// Blend crossover: each gene drawn uniformly from the parents' range
    /// widened by `alpha` times its width on either side.
    BlxAlpha {
        #[serde(default = "default_blx_alpha")]
        alpha: f64,
    },
}

impl Default for CrossoverStrategy {
    fn default() -> Self {
        Self::Sbx {
            eta: default_sbx_eta(),
        }
    }
}

fn default_sbx_eta() -> f64 {
    20.0
}
fn default_blx_alpha() -> f64 {
    0.2
}

/// Genetic operator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Crossover operator.
    #[serde(default)]
    pub crossover: CrossoverStrategy,
    /// Probability of applying crossover to a mating pair (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Per-gene mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Polynomial mutation distribution index.
    #[serde(default = "default_mutation_eta")]
    pub mutation_eta: f64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            crossover: CrossoverStrategy::default(),
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            mutation_eta: default_mutation_eta(),
        }
    }
}

fn default_crossover_rate() -> f64 {
    0.9
}
fn default_mutation_rate() -> f64 {
    0.05
}
fn default_mutation_eta() -> f64 {
    20.0
}

// ============================================================================
// Validation
// ============================================================================

/// Optimisation configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimisationConfigError {
    #[error("Either a population size or an initial population must be provided")]
    MissingPopulationSize,
    #[error("Population size must be an even number of at least 2. Given: {0}")]
    InvalidPopulationSize(usize),
    #[error("Crossover rate must be in range [0, 1]. Given: {0}")]
    InvalidCrossoverRate(f64),
    #[error("Mutation rate must be in range [0, 1]. Given: {0}")]
    InvalidMutationRate(f64),
    #[error("Distribution index {name} must be positive. Given: {value}")]
    InvalidDistributionIndex { name: &'static str, value: f64 },
    #[error("BLX alpha must be non-negative. Given: {0}")]
    InvalidBlxAlpha(f64),
    #[error("Vehicle config validation failed: {0}")]
    VehicleConfigError(#[from] ConfigError),
}

/// Check a breeding population size: pairs are bred from consecutive
/// individuals, so the size must be even and large enough for a tournament.
pub fn validate_population_size(size: usize) -> Result<(), OptimisationConfigError> {
    if size < 2 || size % 2 != 0 {
        return Err(OptimisationConfigError::InvalidPopulationSize(size));
    }
    Ok(())
}

impl OperatorConfig {
    /// Validate operator settings.
    pub fn validate(&self) -> Result<(), OptimisationConfigError> {
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(OptimisationConfigError::InvalidCrossoverRate(
                self.crossover_rate,
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(OptimisationConfigError::InvalidMutationRate(
                self.mutation_rate,
            ));
        }
        if !(self.mutation_eta > 0.0) {
            return Err(OptimisationConfigError::InvalidDistributionIndex {
                name: "mutation_eta",
                value: self.mutation_eta,
            });
        }
        match self.crossover {
            CrossoverStrategy::Sbx { eta } if !(eta > 0.0) => {
                Err(OptimisationConfigError::InvalidDistributionIndex {
                    name: "sbx eta",
                    value: eta,
                })
            }
            CrossoverStrategy::BlxAlpha { alpha } if !(alpha >= 0.0) => {
                Err(OptimisationConfigError::InvalidBlxAlpha(alpha))
            }
            _ => Ok(()),
        }
    }
}

impl OptimisationConfig {
    /// Validate everything except the population size, which may come from
    /// a caller-supplied initial population.
    pub fn validate(&self) -> Result<(), OptimisationConfigError> {
        self.vehicle.validate()?;
        self.operators.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(OptimisationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rate_bounds() {
        for (rate, ok) in [
            (-1.0, false),
            (-0.01, false),
            (0.0, true),
            (0.5, true),
            (1.0, true),
            (1.01, false),
        ] {
            let mut config = OptimisationConfig::default();
            config.operators.mutation_rate = rate;
            assert_eq!(config.validate().is_ok(), ok, "mutation rate {rate}");

            let mut config = OptimisationConfig::default();
            config.operators.crossover_rate = rate;
            assert_eq!(config.validate().is_ok(), ok, "crossover rate {rate}");
        }
    }

    #[test]
    fn test_population_size() {
        assert!(validate_population_size(10).is_ok());
        assert_eq!(
            validate_population_size(7),
            Err(OptimisationConfigError::InvalidPopulationSize(7))
        );
        assert!(validate_population_size(0).is_err());
    }

    #[test]
    fn test_population_size_checked_at_run_time() {
        let config = OptimisationConfig {
            population: PopulationConfig {
                size: Some(7),
                generations: 1,
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_vehicle_error_wrapped() {
        let mut config = OptimisationConfig::default();
        config.vehicle.drivetrain_efficiency = 1.5;
        assert!(matches!(
            config.validate(),
            Err(OptimisationConfigError::VehicleConfigError(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = OptimisationConfig {
            operators: OperatorConfig {
                crossover: CrossoverStrategy::BlxAlpha { alpha: 0.3 },
                ..Default::default()
            },
            random_seed: Some(7),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: OptimisationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.operators.crossover, config.operators.crossover);
        assert_eq!(parsed.random_seed, Some(7));
    }

    #[test]
    fn test_crossover_tag() {
        let parsed: CrossoverStrategy = serde_json::from_str(r#"{"type": "Sbx"}"#).unwrap();
        assert_eq!(parsed, CrossoverStrategy::Sbx { eta: 20.0 });
    }
}
