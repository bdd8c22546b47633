//! Common test utilities for integration tests
//!
//! This module provides:
//! - Assertion helpers for fixed-point comparisons
//! - Deterministic sample generators
//! - Filter fixtures with gains suited to fast convergence

#![allow(dead_code)]

use fixahrs_core::{AhrsConfig, AttitudeEstimator, ImuSample, MadgwickFilter, RawVector, Q16};

pub mod harness;
pub mod scenarios;

/// beta = 0.05
pub const FAST_BETA: Q16 = Q16::from_bits(3277);

/// 0.05 per tick
pub const FAST_STEP: Q16 = Q16::from_bits(3277);

pub fn fast_config() -> AhrsConfig {
    AhrsConfig::new(FAST_BETA, FAST_STEP)
}

/// Filter with a large step so static scenarios settle in a few hundred ticks
pub fn fast_filter() -> MadgwickFilter {
    filter_for(fast_config())
}

pub fn filter_for(config: AhrsConfig) -> MadgwickFilter {
    match MadgwickFilter::new(config) {
        Ok(filter) => filter,
        Err(e) => panic!("config {:?} rejected: {}", config, e),
    }
}

/// Largest settled tilt error for `config`, in LSB of sin(roll) or sin(pitch).
///
/// Once converged every tick still moves the quaternion by `beta·k`, which is
/// at most twice that in the sine, so the estimate straddles the true value
/// within one such jump. The extra 32 LSB absorb rounding.
pub fn settled_tolerance(config: &AhrsConfig) -> u32 {
    let step = (config.beta * config.gyro_integration_factor).to_bits() as u32;
    2 * step + 32
}

/// Feed the same sample `ticks` times
pub fn run_still<E: AttitudeEstimator>(estimator: &mut E, sample: &ImuSample, ticks: usize) {
    for _ in 0..ticks {
        estimator.update(sample);
    }
}

/// `component / |reading|`: the sine a settled estimate should report for the
/// rounded accelerometer reading it was fed
pub fn sin_of_reading(component: i16, reading: &RawVector) -> Q16 {
    let (x, y, z) = (reading.x as f64, reading.y as f64, reading.z as f64);
    let norm = (x * x + y * y + z * z).sqrt();
    Q16::from_f32((component as f64 / norm) as f32)
}
