//! Assertion helpers and deterministic randomness
//!
//! Provides:
//! - Tolerance assertions for float and raw-bit comparisons
//! - A seeded xorshift generator so failures reproduce exactly

/// Assert two floats agree within an absolute tolerance
#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let actual = $actual;
        let expected = $expected;
        let diff = (actual - expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                actual, $tolerance, expected, diff
            );
        }
    };
}

/// Assert two Q16 values agree within a number of LSB
#[macro_export]
macro_rules! assert_bits_within {
    ($actual:expr, $expected:expr, $lsb:expr) => {
        let actual: fixahrs_core::Q16 = $actual;
        let expected: fixahrs_core::Q16 = $expected;
        let diff = actual.abs_diff_bits(expected);
        if diff > $lsb {
            panic!(
                "{} ({} bits) not within {} LSB of {} ({} bits)",
                actual,
                actual.to_bits(),
                $lsb,
                expected,
                expected.to_bits()
            );
        }
    };
}

/// Deterministic random number generator for tests
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        // xorshift has a fixed point at zero
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform in `[-amplitude, amplitude]`
    pub fn next_i16(&mut self, amplitude: i16) -> i16 {
        let span = 2 * amplitude as i32 + 1;
        ((self.next_u32() % span as u32) as i32 - amplitude as i32) as i16
    }
}
