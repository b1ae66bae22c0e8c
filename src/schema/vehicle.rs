//! Candidate vehicle design evolved by the optimiser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Motor power bounds in kW.
pub const MOTOR_POWER_BOUNDS: (f64, f64) = (50.0, 500.0);

/// Battery capacity bounds in kWh.
pub const BATTERY_CAPACITY_BOUNDS: (f64, f64) = (30.0, 150.0);

/// Motor weight per unit of power (kg/kW).
pub const MOTOR_WEIGHT_RATIO: f64 = 4.0;

/// Battery weight per unit of capacity (kg/kWh).
pub const BATTERY_WEIGHT_RATIO: f64 = 6.0;

/// Round to a fixed number of decimal places.
#[inline]
pub fn round_dp(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// One candidate design: the two free genes of the search.
///
/// Genes are clamped to their bounds on construction and the value is never
/// modified afterwards; genetic operators always build a new `Vehicle`.
/// Weights and mass are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "VehicleGenes")]
pub struct Vehicle {
    motor_power: f64,
    battery_capacity: f64,
}

/// Unvalidated genes as read from JSON, clamped through [`Vehicle::new`].
#[derive(Deserialize)]
struct VehicleGenes {
    motor_power: f64,
    battery_capacity: f64,
}

fn clip_gene(value: f64, bounds: (f64, f64)) -> f64 {
    if value.is_nan() {
        bounds.0
    } else {
        value.clamp(bounds.0, bounds.1)
    }
}

impl From<VehicleGenes> for Vehicle {
    fn from(genes: VehicleGenes) -> Self {
        Vehicle::new(genes.motor_power, genes.battery_capacity)
    }
}

impl Vehicle {
    /// Create a vehicle, clamping motor power (kW) and battery capacity (kWh)
    /// into [`MOTOR_POWER_BOUNDS`] and [`BATTERY_CAPACITY_BOUNDS`]. NaN genes
    /// take the lower bound.
    pub fn new(motor_power: f64, battery_capacity: f64) -> Self {
        Self {
            motor_power: clip_gene(motor_power, MOTOR_POWER_BOUNDS),
            battery_capacity: clip_gene(battery_capacity, BATTERY_CAPACITY_BOUNDS),
        }
    }

    /// Build from a gene vector `[motor_power, battery_capacity]`.
    pub fn from_array(genes: [f64; 2]) -> Self {
        Self::new(genes[0], genes[1])
    }

    /// Motor power in kW.
    #[inline]
    pub fn motor_power(&self) -> f64 {
        self.motor_power
    }

    /// Battery capacity in kWh.
    #[inline]
    pub fn battery_capacity(&self) -> f64 {
        self.battery_capacity
    }

    /// Motor weight in kg.
    pub fn motor_weight(&self) -> f64 {
        self.motor_power * MOTOR_WEIGHT_RATIO
    }

    /// Battery weight in kg.
    pub fn battery_weight(&self) -> f64 {
        self.battery_capacity * BATTERY_WEIGHT_RATIO
    }

    /// Total mass in kg, rounded to 2 decimals.
    pub fn mass(&self) -> f64 {
        round_dp(self.motor_weight() + self.battery_weight(), 2)
    }

    /// Genes as `[motor_power, battery_capacity]`.
    pub fn to_array(&self) -> [f64; 2] {
        [self.motor_power, self.battery_capacity]
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle(motor_power={:.2} kW, battery_capacity={:.2} kWh, mass={:.2} kg)",
            self.motor_power,
            self.battery_capacity,
            self.mass()
        )
    }
}
