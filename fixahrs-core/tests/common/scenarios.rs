//! Pre-built IMU scenarios
//!
//! Accelerometer readings for a sensor held still at a known attitude, plus
//! noisy variants. Angles are set up on the host in `f64`; only the resulting
//! raw counts reach the filter.

use fixahrs_core::{ImuSample, RawVector};

use super::harness::TestRng;

/// 1 g at ±2 g full scale
pub const ONE_G: f64 = 16383.0;

/// Sensor lying flat
pub const LEVEL: RawVector = RawVector::new(0, 0, 16383);

/// Reading of a still sensor rolled by `roll_deg` about its X axis
pub fn rolled(roll_deg: f64) -> RawVector {
    let r = roll_deg.to_radians();
    RawVector::new(0, (ONE_G * r.sin()).round() as i16, (ONE_G * r.cos()).round() as i16)
}

/// Reading of a still sensor whose X axis is tipped `pitch_deg` toward down
pub fn pitched(pitch_deg: f64) -> RawVector {
    let p = pitch_deg.to_radians();
    RawVector::new((ONE_G * p.sin()).round() as i16, 0, (ONE_G * p.cos()).round() as i16)
}

/// Still sensor at a fixed attitude with no rotation
pub fn still(accel: RawVector) -> ImuSample {
    ImuSample::new(accel, RawVector::ZERO)
}

/// Add uniform noise to every channel of a still sample
pub fn noisy(
    accel: RawVector,
    rng: &mut TestRng,
    accel_noise: i16,
    gyro_noise: i16,
) -> ImuSample {
    ImuSample::new(
        RawVector::new(
            accel.x.saturating_add(rng.next_i16(accel_noise)),
            accel.y.saturating_add(rng.next_i16(accel_noise)),
            accel.z.saturating_add(rng.next_i16(accel_noise)),
        ),
        RawVector::new(
            rng.next_i16(gyro_noise),
            rng.next_i16(gyro_noise),
            rng.next_i16(gyro_noise),
        ),
    )
}

/// Arbitrary sample within the given per-channel amplitudes
pub fn random_sample(rng: &mut TestRng, accel_amplitude: i16, gyro_amplitude: i16) -> ImuSample {
    ImuSample::new(
        RawVector::new(
            rng.next_i16(accel_amplitude),
            rng.next_i16(accel_amplitude),
            rng.next_i16(accel_amplitude),
        ),
        RawVector::new(
            rng.next_i16(gyro_amplitude),
            rng.next_i16(gyro_amplitude),
            rng.next_i16(gyro_amplitude),
        ),
    )
}
