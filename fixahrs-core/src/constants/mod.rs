//! Constants for the Orientation Core
//!
//! Every numeric literal the estimator depends on lives here with a note on
//! where it comes from. The fixed-point format and the sensor scale are tied
//! together: raw sensor counts are reinterpreted as Q16.16 bits, so the gravity
//! constant and the gain derivations are all expressed in raw counts.
//!
//! ## Organization
//!
//! - **Fixed point**: format parameters and mathematical constants in Q16.16
//! - **Sensors**: full-scale ranges, sensitivities and filter defaults

/// Q16.16 format parameters and mathematical constants.
pub mod fixed_point;

/// Sensor full-scale ranges, sensitivities and filter defaults.
pub mod sensors;

pub use fixed_point::{FRAC_BITS, ONE_BITS, NORM_TOLERANCE_BITS};

pub use sensors::{
    STANDARD_GRAVITY_COUNTS, DEFAULT_SAMPLE_RATE_HZ, DEFAULT_GYRO_ERROR_DPS,
};
