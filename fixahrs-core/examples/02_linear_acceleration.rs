//! Linear Acceleration Example
//!
//! Removes gravity from accelerometer readings once the filter has settled,
//! and projects the remaining horizontal acceleration back onto the sensor's
//! own X/Y axes.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_linear_acceleration
//! ```

use fixahrs_core::{
    AccelRange, AhrsConfig, AttitudeEstimator, GyroRange, ImuSample, MadgwickFilter, RawVector,
};

const RATE_HZ: u32 = 200;

fn main() -> Result<(), fixahrs_core::AhrsError> {
    println!("Linear Acceleration Example");
    println!("===========================\n");

    // ±4 g accelerometer: 1 g reads 8192
    let config = AhrsConfig::for_gyro_range(GyroRange::Dps500, RATE_HZ)?
        .with_accel_range(AccelRange::G4);
    let mut filter = MadgwickFilter::new(config)?;

    let g = config.gravity_counts;
    let at_rest = ImuSample::new(RawVector::new(0, 0, g), RawVector::ZERO);
    for _ in 0..RATE_HZ {
        filter.update(&at_rest);
    }
    println!("Settled after {} samples, tilt {:?}\n", filter.stats().updates, filter.tilt());

    // a short push forward then a brake, still level
    let profile: [(i16, &str); 4] = [(0, "rest"), (2048, "push"), (-1024, "brake"), (0, "rest")];

    println!("  phase    raw accel               linear               body x/y");
    for (push, label) in profile {
        let accel = RawVector::new(push, 0, g);
        filter.update(&ImuSample::new(accel, RawVector::ZERO));

        let linear = filter.linear_acceleration(&accel);
        let body = filter.linear_acceleration_xy_projection(&linear);
        println!(
            "  {:6}   ({:5}, {:5}, {:5})   ({:5}, {:5}, {:5})   ({:5}, {:5})",
            label, accel.x, accel.y, accel.z, linear.x, linear.y, linear.z, body.x, body.y
        );
    }

    Ok(())
}
