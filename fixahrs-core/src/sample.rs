//! Raw IMU samples
//!
//! Sensor drivers hand over signed 16-bit counts per axis. Many drivers burst
//! read all six channels into one interleaved buffer; the `*_IDX` constants
//! describe that layout.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Accelerometer X position in an interleaved six-channel buffer
pub const ACC_X_IDX: usize = 0;
/// Accelerometer Y position in an interleaved six-channel buffer
pub const ACC_Y_IDX: usize = 1;
/// Accelerometer Z position in an interleaved six-channel buffer
pub const ACC_Z_IDX: usize = 2;
/// Gyroscope X position in an interleaved six-channel buffer
pub const GYRO_X_IDX: usize = 3;
/// Gyroscope Y position in an interleaved six-channel buffer
pub const GYRO_Y_IDX: usize = 4;
/// Gyroscope Z position in an interleaved six-channel buffer
pub const GYRO_Z_IDX: usize = 5;

/// Three-axis reading in raw sensor counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawVector {
    /// X axis count
    pub x: i16,
    /// Y axis count
    pub y: i16,
    /// Z axis count
    pub z: i16,
}

impl RawVector {
    /// All axes zero
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Build from per-axis counts
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// True when every axis reads exactly zero.
    ///
    /// The filter treats such an accelerometer sample as "no measurement".
    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }
}

impl From<[i16; 3]> for RawVector {
    fn from([x, y, z]: [i16; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<RawVector> for [i16; 3] {
    fn from(v: RawVector) -> Self {
        [v.x, v.y, v.z]
    }
}

/// One synchronised accelerometer + gyroscope reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuSample {
    /// Accelerometer counts
    pub accel: RawVector,
    /// Gyroscope counts
    pub gyro: RawVector,
}

impl ImuSample {
    /// Pair an accelerometer and a gyroscope reading
    pub const fn new(accel: RawVector, gyro: RawVector) -> Self {
        Self { accel, gyro }
    }

    /// Split an interleaved `[ax, ay, az, gx, gy, gz]` buffer
    pub const fn from_interleaved(raw: &[i16; 6]) -> Self {
        Self {
            accel: RawVector::new(raw[ACC_X_IDX], raw[ACC_Y_IDX], raw[ACC_Z_IDX]),
            gyro: RawVector::new(raw[GYRO_X_IDX], raw[GYRO_Y_IDX], raw[GYRO_Z_IDX]),
        }
    }

    /// Pack back into the interleaved layout
    pub const fn to_interleaved(&self) -> [i16; 6] {
        [
            self.accel.x,
            self.accel.y,
            self.accel.z,
            self.gyro.x,
            self.gyro.y,
            self.gyro.z,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_layout_matches_indices() {
        let sample = ImuSample::from_interleaved(&[1, 2, 3, -4, -5, -6]);
        assert_eq!(sample.accel, RawVector::new(1, 2, 3));
        assert_eq!(sample.gyro, RawVector::new(-4, -5, -6));
        assert_eq!(sample.to_interleaved(), [1, 2, 3, -4, -5, -6]);
    }

    #[test]
    fn zero_detection() {
        assert!(RawVector::ZERO.is_zero());
        assert!(!RawVector::new(0, 0, 1).is_zero());
        assert!(!RawVector::from([-1, 0, 0]).is_zero());
    }

    #[test]
    fn array_conversion_keeps_axis_order() {
        let v = RawVector::new(-300, 16383, 7);
        assert_eq!(<[i16; 3]>::from(v), [-300, 16383, 7]);

        let axes: [i16; 3] = ImuSample::from_interleaved(&[1, 2, 3, 4, 5, 6]).gyro.into();
        assert_eq!(axes, [4, 5, 6]);
    }
}
