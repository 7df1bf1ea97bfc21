//! Fixed-point decimal values
//!
//! A `FixedPoint<P, S>` is a sign flag plus a 256-bit magnitude scaled by
//! `P::BASE`. Zero is always stored as non-negative, so derived equality is
//! value equality.
//!
//! Rounding:
//! - plain operations (`mul`, `div`, `muldiv`) round the magnitude toward zero
//! - `*_out` operations round the magnitude away from zero

mod convert;
mod ops;
mod packed;
mod text;

pub use packed::*;

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use primitive_types::U256;

use crate::error::{NumericError, Result};
use crate::precision::{Precision, Signed, Signedness, Unsigned, P18, P6};

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedPoint<P: Precision, S: Signedness> {
    negative: bool,
    magnitude: U256,
    marker: PhantomData<(P, S)>,
}

pub type Fixed6 = FixedPoint<P6, Signed>;
pub type UFixed6 = FixedPoint<P6, Unsigned>;
pub type Fixed18 = FixedPoint<P18, Signed>;
pub type UFixed18 = FixedPoint<P18, Unsigned>;

/// Unsigned value at the same precision as `P`
pub type UFixed<P> = FixedPoint<P, Unsigned>;

impl<P: Precision, S: Signedness> FixedPoint<P, S> {
    pub const ZERO: Self = Self::canonical(false, U256([0, 0, 0, 0]));
    pub const ONE: Self = Self::canonical(false, P::BASE);
    pub const MAX: Self = Self::canonical(false, S::MAX_MAGNITUDE);
    /// `-MAX` when signed, `ZERO` when unsigned
    pub const MIN: Self = Self::canonical(S::SIGNED, S::MIN_MAGNITUDE);

    /// Build from parts already known to be in range
    #[inline]
    pub(crate) const fn canonical(negative: bool, magnitude: U256) -> Self {
        let U256(limbs) = magnitude;
        let is_zero = limbs[0] == 0 && limbs[1] == 0 && limbs[2] == 0 && limbs[3] == 0;
        Self {
            negative: negative && !is_zero,
            magnitude,
            marker: PhantomData,
        }
    }

    /// Build from a sign and a scaled magnitude, checking the range
    pub fn from_parts(negative: bool, magnitude: U256) -> Result<Self> {
        if magnitude.is_zero() {
            return Ok(Self::ZERO);
        }
        if negative {
            if magnitude > S::MIN_MAGNITUDE {
                return Err(NumericError::Underflow);
            }
        } else if magnitude > S::MAX_MAGNITUDE {
            return Err(NumericError::Overflow);
        }
        Ok(Self::canonical(negative, magnitude))
    }

    /// Whole-unit integer `n`, scaled by the base
    pub fn from_integer(n: i128) -> Result<Self> {
        // |i128| * 10^18 < 2^256, the product cannot wrap
        let magnitude = U256::from(n.unsigned_abs()) * P::BASE;
        Self::from_parts(n < 0, magnitude)
    }

    /// Whole-unit unsigned integer; always representable
    pub fn from_u64(n: u64) -> Self {
        Self::canonical(false, U256::from(n) * P::BASE)
    }

    /// Value whose scaled integer is `raw`
    pub fn from_raw_i128(raw: i128) -> Result<Self> {
        Self::from_parts(raw < 0, U256::from(raw.unsigned_abs()))
    }

    /// Scaled integer as an i128
    pub fn to_raw_i128(self) -> Result<i128> {
        Signed::pack(self.negative, self.magnitude)
    }

    /// Scaled magnitude
    #[inline]
    pub fn raw_magnitude(self) -> U256 {
        self.magnitude
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.magnitude.is_zero()
    }

    /// -1, 0 or 1
    pub fn sign(self) -> i8 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    pub fn abs(self) -> UFixed<P> {
        FixedPoint::canonical(false, self.magnitude)
    }

    /// Drop the fractional part, rounding toward zero
    pub fn truncate(self) -> Self {
        let fraction = self.magnitude % P::BASE;
        Self::canonical(self.negative, self.magnitude - fraction)
    }

    pub fn compare(self, other: Self) -> Ordering {
        self.cmp(&other)
    }
}

impl<P: Precision> FixedPoint<P, Signed> {
    pub const NEG_ONE: Self = Self::canonical(true, P::BASE);
}

impl<P: Precision, S: Signedness> Ord for FixedPoint<P, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl<P: Precision, S: Signedness> PartialOrd for FixedPoint<P, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Precision, S: Signedness> fmt::Debug for FixedPoint<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if S::SIGNED { "" } else { "U" };
        write!(f, "{}Fixed{}({})", prefix, P::DECIMALS, self)
    }
}
