//! Fixed physical parameters shared by every objective evaluation in a run.

use serde::{Deserialize, Serialize};

/// Vehicle physics configuration.
///
/// Everything except the two evolved genes (motor power, battery capacity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Tire pressure in bar.
    #[serde(default = "default_tire_pressure")]
    pub tire_pressure_bar: f64,
    /// Maximum motor speed in RPM.
    #[serde(default = "default_motor_rpm")]
    pub motor_rpm: f64,
    /// Tire radius in m.
    #[serde(default = "default_tire_radius")]
    pub tire_radius_m: f64,
    /// Frontal area in m².
    #[serde(default = "default_frontal_area")]
    pub frontal_area_m2: f64,
    /// Aerodynamic drag coefficient.
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f64,
    /// Motor-to-wheel gear ratio.
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f64,
    /// Cruising speed used for the range objective, in km/h.
    #[serde(default = "default_cruising_speed")]
    pub cruising_speed_kmh: f64,
    /// Drivetrain efficiency in (0, 1].
    #[serde(default = "default_drivetrain_efficiency")]
    pub drivetrain_efficiency: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            tire_pressure_bar: default_tire_pressure(),
            motor_rpm: default_motor_rpm(),
            tire_radius_m: default_tire_radius(),
            frontal_area_m2: default_frontal_area(),
            drag_coefficient: default_drag_coefficient(),
            gear_ratio: default_gear_ratio(),
            cruising_speed_kmh: default_cruising_speed(),
            drivetrain_efficiency: default_drivetrain_efficiency(),
        }
    }
}

fn default_tire_pressure() -> f64 {
    2.5
}
fn default_motor_rpm() -> f64 {
    6000.0
}
fn default_tire_radius() -> f64 {
    0.65
}
fn default_frontal_area() -> f64 {
    2.2
}
fn default_drag_coefficient() -> f64 {
    0.25
}
fn default_gear_ratio() -> f64 {
    10.0
}
fn default_cruising_speed() -> f64 {
    100.0
}
fn default_drivetrain_efficiency() -> f64 {
    1.0
}

impl VehicleConfig {
    /// Validate configuration parameters.
    ///
    /// Rejects every value that would make the physics model divide by zero
    /// or return a meaningless result.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tire_pressure_bar", self.tire_pressure_bar),
            ("motor_rpm", self.motor_rpm),
            ("tire_radius_m", self.tire_radius_m),
            ("frontal_area_m2", self.frontal_area_m2),
            ("gear_ratio", self.gear_ratio),
            ("cruising_speed_kmh", self.cruising_speed_kmh),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.drag_coefficient >= 0.0 && self.drag_coefficient.is_finite()) {
            return Err(ConfigError::InvalidDragCoefficient(self.drag_coefficient));
        }
        if !(self.drivetrain_efficiency > 0.0 && self.drivetrain_efficiency <= 1.0) {
            return Err(ConfigError::InvalidDrivetrainEfficiency(
                self.drivetrain_efficiency,
            ));
        }
        Ok(())
    }
}

/// Vehicle configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be positive and finite. Given: {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("Drag coefficient must be non-negative. Given: {0}")]
    InvalidDragCoefficient(f64),
    #[error("Drivetrain efficiency must be in range (0, 1]. Given: {0}")]
    InvalidDrivetrainEfficiency(f64),
}
