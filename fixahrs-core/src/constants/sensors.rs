//! Sensor Specifications and Filter Defaults
//!
//! Full-scale ranges of the common 16-bit MEMS parts (MPU-6050, MPU-9250,
//! ICM-20948 and friends all share these sensitivity tables).

// ===== ACCELEROMETER =====

/// One standard gravity in raw counts at ±2 g full scale.
///
/// The datasheet sensitivity is 16384 LSB/g; the estimator cancels gravity
/// with the largest count below 2^14.
///
/// Source: MPU-6050 register map, ACCEL_CONFIG AFS_SEL = 0
pub const STANDARD_GRAVITY_COUNTS: i16 = 16383;

/// One standard gravity in raw counts at ±4 g full scale.
pub const GRAVITY_COUNTS_4G: i16 = 8192;

/// One standard gravity in raw counts at ±8 g full scale.
pub const GRAVITY_COUNTS_8G: i16 = 4096;

/// One standard gravity in raw counts at ±16 g full scale.
pub const GRAVITY_COUNTS_16G: i16 = 2048;

// ===== GYROSCOPE =====

// Gyroscope sensitivities are kept in tenths of LSB per °/s so gain
// derivation stays in integer arithmetic.
// Source: MPU-6050 register map, GYRO_CONFIG FS_SEL

/// ±250 °/s: 131 LSB per °/s
pub const GYRO_SENSITIVITY_250DPS_TENTHS: u32 = 1310;

/// ±500 °/s: 65.5 LSB per °/s
pub const GYRO_SENSITIVITY_500DPS_TENTHS: u32 = 655;

/// ±1000 °/s: 32.8 LSB per °/s
pub const GYRO_SENSITIVITY_1000DPS_TENTHS: u32 = 328;

/// ±2000 °/s: 16.4 LSB per °/s
pub const GYRO_SENSITIVITY_2000DPS_TENTHS: u32 = 164;

/// Degrees in a full turn.
pub const DEGREES_PER_TURN: u64 = 360;

// ===== FILTER DEFAULTS =====

/// Default sampling rate (Hz).
///
/// 100 Hz is the usual output data rate for attitude estimation on small
/// microcontrollers.
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 100;

/// Default gyroscope measurement error used to derive beta (°/s).
///
/// Madgwick's usual β = 0.1 rad/s corresponds to roughly 6.6 °/s; a settled
/// MEMS gyro after bias removal does a little better.
///
/// Source: Madgwick, section 3.6 and 7.2
pub const DEFAULT_GYRO_ERROR_DPS: u16 = 5;
