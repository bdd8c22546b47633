//! Orientation Tracking Example
//!
//! Feeds a simulated 6-axis IMU through the Madgwick filter and prints the
//! estimated tilt as the sensor is rolled over and then spun about gravity.
//!
//! ## What You'll Learn
//!
//! - Deriving filter gains from the sensor's range and sample rate
//! - Running the update once per sampling tick
//! - Reading roll/pitch back out of the quaternion
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_orientation_tracking
//! ```

use fixahrs_core::{
    AhrsConfig, AttitudeEstimator, GyroRange, ImuSample, MadgwickFilter, RawVector,
};

const RATE_HZ: u32 = 100;

/// ±2000 °/s: 16.4 LSB per °/s
const GYRO_LSB_PER_DPS: f64 = 16.4;

/// ±2 g: 16383 LSB per g
const ONE_G: f64 = 16383.0;

/// Still sensor rolled by `roll_deg`, rotating about its Z axis at `yaw_dps`
fn simulate(roll_deg: f64, roll_rate_dps: f64, yaw_dps: f64) -> ImuSample {
    let roll = roll_deg.to_radians();
    ImuSample::new(
        RawVector::new(
            0,
            (ONE_G * roll.sin()).round() as i16,
            (ONE_G * roll.cos()).round() as i16,
        ),
        RawVector::new(
            (roll_rate_dps * GYRO_LSB_PER_DPS).round() as i16,
            0,
            (yaw_dps * GYRO_LSB_PER_DPS).round() as i16,
        ),
    )
}

fn main() -> Result<(), fixahrs_core::AhrsError> {
    println!("Fixed-Point Orientation Tracking Example");
    println!("========================================\n");

    let config = AhrsConfig::for_gyro_range(GyroRange::Dps2000, RATE_HZ)?;
    println!("Gains for ±2000 °/s at {} Hz:", RATE_HZ);
    println!("  beta:               {} ({} raw)", config.beta, config.beta.to_bits());
    println!(
        "  integration factor: {} ({} raw)\n",
        config.gyro_integration_factor,
        config.gyro_integration_factor.to_bits()
    );

    let mut filter = MadgwickFilter::new(config)?;

    println!("Phase 1: roll over to 40° at 20 °/s, then hold");
    println!("  tick   true roll   est. roll   est. pitch");
    let mut true_roll = 0.0;
    for tick in 0..400u32 {
        let roll_rate = if true_roll < 40.0 { 20.0 } else { 0.0 };
        true_roll += roll_rate / RATE_HZ as f64;

        filter.update(&simulate(true_roll, roll_rate, 0.0));

        if tick % 50 == 49 {
            let tilt = filter.tilt();
            println!(
                "  {:4}   {:8.2}°   {:8.2}°   {:9.2}°",
                tick + 1,
                true_roll,
                tilt.roll_degrees(),
                tilt.pitch_degrees()
            );
        }
    }

    println!("\nPhase 2: spin about gravity at 45 °/s");
    for tick in 0..200u32 {
        filter.update(&simulate(true_roll, 0.0, 45.0));
        if tick % 50 == 49 {
            let q = filter.orientation();
            let tilt = filter.tilt();
            println!(
                "  tick {:3}: q = [{:+.4}, {:+.4}, {:+.4}, {:+.4}]  roll {:.2}°",
                tick + 1,
                q.q0.to_f32(),
                q.q1.to_f32(),
                q.q2.to_f32(),
                q.q3.to_f32(),
                tilt.roll_degrees()
            );
        }
    }

    let stats = filter.stats();
    println!(
        "\n{} updates, {} gyro-only, {} recoveries",
        stats.updates, stats.gyro_only, stats.recoveries
    );

    Ok(())
}
