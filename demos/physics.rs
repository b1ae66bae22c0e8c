//! Worked example of the vehicle physics for a single design.
//!
//! Run with: `cargo run --example physics`

use ev_optimisation::compute::{
    PhysicsError, coeff_rolling_resistance, drag_force, kmh_to_ms, motor_driving_force,
    rolling_resistance_force, rpm_to_rads, time_to_battery_drain, time_to_target_speed,
};

fn main() -> Result<(), PhysicsError> {
    let mass_kg = 1500.0;
    let tire_pressure_bar = 2.5;
    let area_m2 = 2.2;
    let drag_coefficient = 0.25;

    // Acceleration
    let motor_rpm = 6000.0;
    let motor_power_w = 50_000.0;
    let tire_radius_m = 0.65;
    let gear_ratio = 10.0;

    let drive_force = motor_driving_force(
        motor_power_w,
        rpm_to_rads(motor_rpm),
        gear_ratio,
        tire_radius_m,
    )?;
    let time_s = time_to_target_speed(
        drive_force,
        tire_pressure_bar,
        mass_kg,
        area_m2,
        drag_coefficient,
    )?;
    println!("0-100 km/h: {time_s:.2} s (drive force {drive_force:.1} N)");

    // Range
    let cruising_kmh = 100.0;
    let drivetrain_efficiency = 1.0;
    let battery_kwh = 80.0;

    let rolling = rolling_resistance_force(
        coeff_rolling_resistance(tire_pressure_bar, cruising_kmh)?,
        mass_kg,
    );
    let drag = drag_force(drag_coefficient, kmh_to_ms(cruising_kmh), area_m2);
    let hours = time_to_battery_drain(
        drag + rolling,
        cruising_kmh,
        drivetrain_efficiency,
        battery_kwh,
    )?;
    println!(
        "Range at {cruising_kmh} km/h: {:.2} km (rolling {rolling:.1} N, drag {drag:.1} N)",
        hours * cruising_kmh
    );

    Ok(())
}
