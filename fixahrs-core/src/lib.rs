//! Fixed-point orientation core
//!
//! Tracks the attitude of a 6-axis IMU (accelerometer + gyroscope) with
//! Madgwick's gradient-descent filter, using only Q16.16 integer arithmetic.
//! Designed for microcontrollers without an FPU.
//!
//! Key constraints:
//! - No heap allocation, no floating point in the update path
//! - Fixed cost per sample (bounded loops only)
//! - Raw 16-bit sensor counts go in, raw counts come out
//!
//! ```rust
//! use fixahrs_core::{
//!     AhrsConfig, AttitudeEstimator, GyroRange, ImuSample, MadgwickFilter, RawVector,
//! };
//!
//! let config = AhrsConfig::for_gyro_range(GyroRange::Dps2000, 100)?;
//! let mut filter = MadgwickFilter::new(config)?;
//!
//! // one burst read from the sensor: [ax, ay, az, gx, gy, gz]
//! let sample = ImuSample::from_interleaved(&[0, 0, 16383, 0, 0, 0]);
//! filter.update(&sample);
//!
//! let tilt = filter.tilt();
//! let linear = filter.linear_acceleration(&sample.accel);
//! assert_eq!(linear, RawVector::ZERO);
//! assert!(tilt.roll_degrees().abs() < 0.1);
//! # Ok::<(), fixahrs_core::AhrsError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod config;
pub mod constants;
pub mod errors;
pub mod fixed_point;
pub mod fusion;
pub mod quaternion;
pub mod sample;
pub mod traits;
pub mod transforms;

// Public API
pub use config::{AccelRange, AhrsConfig, GyroRange};
pub use errors::{AhrsError, AhrsResult};
pub use fixed_point::Q16;
pub use fusion::{FilterStats, MadgwickFilter, UpdateStatus};
pub use quaternion::Quaternion;
pub use sample::{ImuSample, RawVector};
pub use traits::AttitudeEstimator;
pub use transforms::{
    linear_acceleration, linear_acceleration_xy_projection, sin_pitch, sin_roll, Tilt,
    XyProjection,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
