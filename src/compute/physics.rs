//! Longitudinal vehicle physics.
//!
//! Pure functions for forces and derived kinematics. Anything that would
//! divide by zero returns a [`PhysicsError`] instead of NaN or infinity.

use std::f64::consts::PI;

use crate::schema::round_dp;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Air density at NTP (kg/m³).
pub const AIR_DENSITY: f64 = 1.2;

/// Target speed of the acceleration objective (km/h).
pub const DEFAULT_TARGET_SPEED_KMH: f64 = 100.0;

/// Euler integration step for [`time_to_target_speed`] (s).
///
/// Changing it changes the reported times; keep it fixed for reproducible runs.
pub const DEFAULT_TIME_STEP: f64 = 0.01;

/// Errors raised by the physics model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("{name} must be positive. Given: {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("Drivetrain efficiency must be in range (0, 1]. Given: {0}")]
    InvalidDrivetrainEfficiency(f64),
    #[error("Drag coefficient must be non-negative. Given: {0}")]
    InvalidDragCoefficient(f64),
    #[error(
        "Target speed {target_kmh} km/h unreachable: drive force {drive_force:.1} N \
         does not exceed resistance {resistance:.1} N"
    )]
    TargetSpeedUnreachable {
        target_kmh: f64,
        drive_force: f64,
        resistance: f64,
    },
}

fn require_positive(name: &'static str, value: f64) -> Result<f64, PhysicsError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(PhysicsError::NonPositive { name, value })
    }
}

/// Convert RPM to rad/s.
#[inline]
pub fn rpm_to_rads(rpm: f64) -> f64 {
    rpm * 2.0 * PI / 60.0
}

/// Convert km/h to m/s.
#[inline]
pub fn kmh_to_ms(kmh: f64) -> f64 {
    kmh / 3.6
}

/// Convert m/s to km/h.
#[inline]
pub fn ms_to_kmh(ms: f64) -> f64 {
    ms * 3.6
}

/// Tractive force (N) at the wheel for a motor delivering `power_w` at
/// `motor_rads` through `gear_ratio` onto a tire of radius `tire_radius_m`.
pub fn motor_driving_force(
    power_w: f64,
    motor_rads: f64,
    gear_ratio: f64,
    tire_radius_m: f64,
) -> Result<f64, PhysicsError> {
    let motor_rads = require_positive("motor speed", motor_rads)?;
    let gear_ratio = require_positive("gear ratio", gear_ratio)?;
    let tire_radius_m = require_positive("tire radius", tire_radius_m)?;

    let wheel_speed_ms = motor_rads / gear_ratio * tire_radius_m;
    Ok(power_w / wheel_speed_ms)
}

/// Rolling resistance coefficient for a tire pressure (bar) and speed (km/h).
pub fn coeff_rolling_resistance(
    tire_pressure_bar: f64,
    velocity_kmh: f64,
) -> Result<f64, PhysicsError> {
    let tire_pressure_bar = require_positive("tire pressure", tire_pressure_bar)?;
    let velocity_term = 0.0095 * (velocity_kmh / 100.0).powi(2);
    Ok(0.005 + (1.0 / tire_pressure_bar) * (0.01 + velocity_term))
}

/// Rolling resistance force (N).
#[inline]
pub fn rolling_resistance_force(coefficient: f64, mass_kg: f64) -> f64 {
    coefficient * mass_kg * GRAVITY
}

/// Aerodynamic drag force (N) at `velocity_ms` in air.
#[inline]
pub fn drag_force(drag_coefficient: f64, velocity_ms: f64, area_m2: f64) -> f64 {
    drag_coefficient * 0.5 * AIR_DENSITY * velocity_ms.powi(2) * area_m2
}

/// Hours until the battery is empty when holding `velocity_kmh` against a
/// constant resisting force `total_force_n`.
pub fn time_to_battery_drain(
    total_force_n: f64,
    velocity_kmh: f64,
    drivetrain_efficiency: f64,
    battery_kwh: f64,
) -> Result<f64, PhysicsError> {
    if !(drivetrain_efficiency > 0.0 && drivetrain_efficiency <= 1.0) {
        return Err(PhysicsError::InvalidDrivetrainEfficiency(
            drivetrain_efficiency,
        ));
    }

    let power_kw = total_force_n * kmh_to_ms(velocity_kmh) / 1000.0 / drivetrain_efficiency;
    let power_kw = require_positive("required power", power_kw)?;

    Ok(battery_kwh / power_kw)
}

/// Seconds to accelerate from standstill to 100 km/h.
///
/// See [`time_to_target_speed_with`].
pub fn time_to_target_speed(
    drive_force_n: f64,
    tire_pressure_bar: f64,
    mass_kg: f64,
    area_m2: f64,
    drag_coefficient: f64,
) -> Result<f64, PhysicsError> {
    time_to_target_speed_with(
        drive_force_n,
        tire_pressure_bar,
        mass_kg,
        area_m2,
        drag_coefficient,
        DEFAULT_TARGET_SPEED_KMH,
        DEFAULT_TIME_STEP,
    )
}

/// Seconds to accelerate from standstill to `target_kmh`, by forward Euler
/// integration with step `dt`.
///
/// Each step applies `a = (F_drive - F_drag(v) - F_rolling(v)) / m`. The
/// target is converted to m/s and rounded to 2 decimals before comparison.
/// Drag and rolling resistance both grow with speed, so the target is
/// reachable exactly when the drive force beats them at the target speed,
/// given a non-negative drag coefficient and a positive frontal area.
pub fn time_to_target_speed_with(
    drive_force_n: f64,
    tire_pressure_bar: f64,
    mass_kg: f64,
    area_m2: f64,
    drag_coefficient: f64,
    target_kmh: f64,
    dt: f64,
) -> Result<f64, PhysicsError> {
    let mass_kg = require_positive("mass", mass_kg)?;
    let area_m2 = require_positive("frontal area", area_m2)?;
    let target_kmh = require_positive("target speed", target_kmh)?;
    let dt = require_positive("time step", dt)?;
    if !(drag_coefficient >= 0.0 && drag_coefficient.is_finite()) {
        return Err(PhysicsError::InvalidDragCoefficient(drag_coefficient));
    }
    let target_ms = round_dp(kmh_to_ms(target_kmh), 2);

    let resistance_at_target = drag_force(drag_coefficient, target_ms, area_m2)
        + rolling_resistance_force(
            coeff_rolling_resistance(tire_pressure_bar, ms_to_kmh(target_ms))?,
            mass_kg,
        );
    if !(drive_force_n > resistance_at_target) {
        return Err(PhysicsError::TargetSpeedUnreachable {
            target_kmh,
            drive_force: drive_force_n,
            resistance: resistance_at_target,
        });
    }

    let mut velocity = 0.0;
    let mut time = 0.0;
    while velocity < target_ms {
        let f_drag = drag_force(drag_coefficient, velocity, area_m2);
        let f_rolling = rolling_resistance_force(
            coeff_rolling_resistance(tire_pressure_bar, ms_to_kmh(velocity))?,
            mass_kg,
        );
        velocity += (drive_force_n - f_drag - f_rolling) / mass_kg * dt;
        time += dt;
    }

    Ok(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_unit_conversions() {
        assert!((rpm_to_rads(60.0) - 2.0 * PI).abs() < EPS);
        assert!((kmh_to_ms(36.0) - 10.0).abs() < EPS);
        assert!((ms_to_kmh(kmh_to_ms(123.4)) - 123.4).abs() < EPS);
    }

    #[test]
    fn test_coeff_rolling_resistance_reference_values() {
        // Reference values from engineeringtoolbox.com
        for (pressure, velocity, expected) in [(2.9, 90.0, 0.011), (3.5, 90.0, 0.010)] {
            let c = coeff_rolling_resistance(pressure, velocity).unwrap();
            assert!((c - expected).abs() < 1e-3, "{pressure} bar: {c}");
        }
    }

    #[test]
    fn test_zero_divisors_rejected() {
        assert!(coeff_rolling_resistance(0.0, 50.0).is_err());
        assert!(motor_driving_force(50_000.0, 0.0, 10.0, 0.65).is_err());
        assert!(motor_driving_force(50_000.0, 628.0, 0.0, 0.65).is_err());
    }

    #[test]
    fn test_motor_driving_force() {
        // 628.3 rad/s through a 10:1 reduction on a 0.65 m tire is ~40.84 m/s.
        let force = motor_driving_force(50_000.0, rpm_to_rads(6000.0), 10.0, 0.65).unwrap();
        assert!((force - 1224.25).abs() < 0.1, "{force}");
    }

    #[test]
    fn test_forces() {
        assert!((rolling_resistance_force(0.01, 1000.0) - 98.1).abs() < EPS);
        assert!((drag_force(0.25, 10.0, 2.0) - 30.0).abs() < EPS);
    }

    #[test]
    fn test_battery_drain_efficiency_validation() {
        for (eff, ok) in [(0.0, false), (0.5, true), (1.0, true), (1.5, false)] {
            let result = time_to_battery_drain(500.0, 100.0, eff, 80.0);
            assert_eq!(result.is_ok(), ok, "efficiency {eff}");
        }
        assert_eq!(
            time_to_battery_drain(500.0, 100.0, 0.0, 80.0),
            Err(PhysicsError::InvalidDrivetrainEfficiency(0.0))
        );
    }

    #[test]
    fn test_battery_drain_hours() {
        // 360 N at 10 m/s is 3.6 kW, so 36 kWh lasts 10 h.
        let hours = time_to_battery_drain(360.0, 36.0, 1.0, 36.0).unwrap();
        assert!((hours - 10.0).abs() < EPS);

        let lossy = time_to_battery_drain(360.0, 36.0, 0.5, 36.0).unwrap();
        assert!((lossy - 5.0).abs() < EPS);
    }

    #[test]
    fn test_battery_drain_zero_speed_rejected() {
        assert!(time_to_battery_drain(360.0, 0.0, 1.0, 36.0).is_err());
    }

    #[test]
    fn test_time_to_target_speed() {
        let force = motor_driving_force(50_000.0, rpm_to_rads(6000.0), 10.0, 0.65).unwrap();
        let time = time_to_target_speed(force, 2.5, 1500.0, 2.2, 0.25).unwrap();
        assert!(time > 30.0 && time < 60.0, "{time}");

        let stronger = time_to_target_speed(2.0 * force, 2.5, 1500.0, 2.2, 0.25).unwrap();
        assert!(stronger < time);

        let heavier = time_to_target_speed(force, 2.5, 2500.0, 2.2, 0.25).unwrap();
        assert!(heavier > time);
    }

    #[test]
    fn test_time_to_target_speed_is_whole_steps() {
        let time = time_to_target_speed_with(5000.0, 2.5, 1000.0, 2.2, 0.25, 100.0, 0.5).unwrap();
        let steps = time / 0.5;
        assert!((steps - steps.round()).abs() < 1e-6);
    }

    #[test]
    fn test_acceleration_inputs_rejected() {
        assert_eq!(
            time_to_target_speed(1.0, 2.5, 1000.0, 2.2, -50.0),
            Err(PhysicsError::InvalidDragCoefficient(-50.0))
        );
        assert!(matches!(
            time_to_target_speed(5000.0, 2.5, 1000.0, -2.2, 0.25),
            Err(PhysicsError::NonPositive { name: "frontal area", .. })
        ));
        assert!(matches!(
            time_to_target_speed_with(5000.0, 2.5, 1000.0, 2.2, 0.25, f64::INFINITY, 0.01),
            Err(PhysicsError::NonPositive { name: "target speed", .. })
        ));
        assert!(matches!(
            time_to_target_speed_with(5000.0, 2.5, 1000.0, 2.2, 0.25, f64::NAN, 0.01),
            Err(PhysicsError::NonPositive { name: "target speed", .. })
        ));
    }

    #[test]
    fn test_unreachable_target_speed() {
        let result = time_to_target_speed(100.0, 2.5, 1500.0, 2.2, 0.25);
        assert!(matches!(
            result,
            Err(PhysicsError::TargetSpeedUnreachable { .. })
        ));
    }
}
