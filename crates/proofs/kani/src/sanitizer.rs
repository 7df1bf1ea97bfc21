//! Input space sanitizer - bounds raw values for Kani exploration
//!
//! Raw inputs are plain integers in 6-decimal units. Wrapping them through
//! the packed form keeps construction infallible, so harnesses never need to
//! unwrap while building inputs.

use rate_model::{Fixed6, PController6, PackedFixed6, PackedUFixed6, UFixed6};

pub const MAX_STEPS: u8 = 4;

/// Bounds for tractable verification
pub const MAX_RAW: i128 = 1_000_000_000;
pub const MAX_GAIN: u64 = 100;
pub const MAX_CAP: u64 = 1_000;
pub const MAX_ELAPSED: u64 = 1_000;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for i128 {
    fn sanitize(self) -> i128 {
        if self > MAX_RAW || self < -MAX_RAW {
            self % MAX_RAW
        } else {
            self
        }
    }
}

/// Signed 6-decimal value from a raw integer, folded into `[-MAX_RAW, MAX_RAW]`
pub fn fixed6(raw: i128) -> Fixed6 {
    PackedFixed6::from_word(raw.sanitize()).unpack()
}

/// Unsigned 6-decimal value from a raw integer, folded into `[0, MAX_RAW]`
pub fn ufixed6(raw: u128) -> UFixed6 {
    PackedUFixed6::from_word(raw % (MAX_RAW as u128 + 1)).unpack()
}

/// One controller call, in raw units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerInput {
    /// Whole units
    pub k: u64,
    /// Whole units
    pub max: u64,
    pub value: i128,
    pub skew: i128,
    pub from: u64,
    pub elapsed: u64,
}

impl Sanitize for ControllerInput {
    fn sanitize(mut self) -> ControllerInput {
        // Non-zero gain to keep the extrapolation defined
        self.k = if self.k == 0 {
            1
        } else if self.k > MAX_GAIN {
            (self.k % MAX_GAIN) + 1
        } else {
            self.k
        };

        self.max = if self.max > MAX_CAP {
            self.max % MAX_CAP
        } else {
            self.max
        };

        self.value = self.value.sanitize();
        self.skew = self.skew.sanitize();
        self.from %= MAX_ELAPSED;
        self.elapsed %= MAX_ELAPSED + 1;
        self
    }
}

impl ControllerInput {
    pub fn controller(&self) -> PController6 {
        PController6::new(UFixed6::from_u64(self.k), UFixed6::from_u64(self.max))
    }

    pub fn value(&self) -> Fixed6 {
        fixed6(self.value)
    }

    pub fn skew(&self) -> Fixed6 {
        fixed6(self.skew)
    }

    pub fn interval(&self) -> (u64, u64) {
        (self.from, self.from + self.elapsed)
    }
}
