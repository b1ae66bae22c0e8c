//! Objective evaluation: maps a vehicle design to `[-range, acceleration time]`.

use rayon::prelude::*;

use super::physics::{
    PhysicsError, coeff_rolling_resistance, drag_force, kmh_to_ms, motor_driving_force,
    rolling_resistance_force, rpm_to_rads, time_to_battery_drain, time_to_target_speed,
};
use crate::schema::{Objectives, Vehicle, VehicleConfig};

/// 0-100 km/h time in seconds.
pub fn vehicle_acc_time(vehicle: &Vehicle, config: &VehicleConfig) -> Result<f64, PhysicsError> {
    let drive_force = motor_driving_force(
        vehicle.motor_power() * 1000.0,
        rpm_to_rads(config.motor_rpm),
        config.gear_ratio,
        config.tire_radius_m,
    )?;

    time_to_target_speed(
        drive_force,
        config.tire_pressure_bar,
        vehicle.mass(),
        config.frontal_area_m2,
        config.drag_coefficient,
    )
}

/// Range in km when cruising at the configured speed until the battery is empty.
pub fn vehicle_range(vehicle: &Vehicle, config: &VehicleConfig) -> Result<f64, PhysicsError> {
    let c_r = coeff_rolling_resistance(config.tire_pressure_bar, config.cruising_speed_kmh)?;
    let f_rolling = rolling_resistance_force(c_r, vehicle.mass());

    let f_drag = drag_force(
        config.drag_coefficient,
        kmh_to_ms(config.cruising_speed_kmh),
        config.frontal_area_m2,
    );

    let hours = time_to_battery_drain(
        f_drag + f_rolling,
        config.cruising_speed_kmh,
        config.drivetrain_efficiency,
        vehicle.battery_capacity(),
    )?;

    Ok(hours * config.cruising_speed_kmh)
}

/// Objective vector `[-range_km, time_s]`; range is negated so both are minimised.
pub fn objective(vehicle: &Vehicle, config: &VehicleConfig) -> Result<Objectives, PhysicsError> {
    let time = vehicle_acc_time(vehicle, config)?;
    let range = vehicle_range(vehicle, config)?;
    Ok([-range, time])
}

/// Evaluate every individual. Row `i` of the result belongs to `population[i]`.
///
/// Evaluations are independent and run on the rayon pool.
pub fn evaluate_population(
    population: &[Vehicle],
    config: &VehicleConfig,
) -> Result<Vec<Objectives>, PhysicsError> {
    population
        .par_iter()
        .map(|vehicle| objective(vehicle, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_signs() {
        let config = VehicleConfig::default();
        let [neg_range, time] = objective(&Vehicle::new(150.0, 80.0), &config).unwrap();
        assert!(neg_range < 0.0);
        assert!(time > 0.0);
    }

    #[test]
    fn test_range_decreases_with_cruising_speed() {
        let vehicle = Vehicle::new(150.0, 80.0);
        let slow = VehicleConfig {
            cruising_speed_kmh: 10.0,
            ..Default::default()
        };
        let fast = VehicleConfig {
            cruising_speed_kmh: 100.0,
            ..Default::default()
        };
        assert!(vehicle_range(&vehicle, &slow).unwrap() > vehicle_range(&vehicle, &fast).unwrap());
    }

    #[test]
    fn test_range_grows_with_battery() {
        let config = VehicleConfig::default();
        let small = vehicle_range(&Vehicle::new(150.0, 40.0), &config).unwrap();
        let large = vehicle_range(&Vehicle::new(150.0, 120.0), &config).unwrap();
        assert!(large > small);
    }

    #[test]
    fn test_acceleration_improves_with_power() {
        let config = VehicleConfig::default();
        let weak = vehicle_acc_time(&Vehicle::new(60.0, 60.0), &config).unwrap();
        let strong = vehicle_acc_time(&Vehicle::new(400.0, 60.0), &config).unwrap();
        assert!(strong < weak);
    }

    #[test]
    fn test_invalid_efficiency_propagates() {
        let config = VehicleConfig {
            drivetrain_efficiency: 1.5,
            ..Default::default()
        };
        assert_eq!(
            vehicle_range(&Vehicle::new(100.0, 50.0), &config),
            Err(PhysicsError::InvalidDrivetrainEfficiency(1.5))
        );
    }

    #[test]
    fn test_evaluate_population_preserves_order() {
        let config = VehicleConfig::default();
        let population: Vec<Vehicle> = (0..16)
            .map(|i| Vehicle::new(50.0 + 25.0 * i as f64, 30.0 + 7.0 * i as f64))
            .collect();

        let matrix = evaluate_population(&population, &config).unwrap();
        assert_eq!(matrix.len(), population.len());
        for (vehicle, row) in population.iter().zip(&matrix) {
            assert_eq!(*row, objective(vehicle, &config).unwrap());
        }
    }
}
