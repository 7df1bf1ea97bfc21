//! Precision and signedness markers for `FixedPoint`

use core::fmt::Debug;
use core::hash::Hash;

use primitive_types::U256;

use crate::error::{NumericError, Result};

/// Number of fractional decimal digits carried by a fixed-point type
pub trait Precision: Copy + Debug + Default + PartialEq + Eq + Hash + 'static {
    const DECIMALS: u32;
    /// 10^DECIMALS
    const BASE: U256;
}

/// 6 fractional digits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct P6;

/// 18 fractional digits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct P18;

impl Precision for P6 {
    const DECIMALS: u32 = 6;
    const BASE: U256 = U256([1_000_000, 0, 0, 0]);
}

impl Precision for P18 {
    const DECIMALS: u32 = 18;
    const BASE: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);
}

/// Whether negative values are representable, and how values pack into 128 bits
pub trait Signedness: Copy + Debug + Default + PartialEq + Eq + Hash + 'static {
    const SIGNED: bool;
    /// Largest representable magnitude
    const MAX_MAGNITUDE: U256;
    /// Magnitude of the most negative value (zero when unsigned)
    const MIN_MAGNITUDE: U256;

    /// 128-bit storage word
    type Word: Copy + Debug + Default + PartialEq + Eq + Hash;

    fn pack(negative: bool, magnitude: U256) -> Result<Self::Word>;
    fn unpack(word: Self::Word) -> (bool, U256);
    fn word_to_be_bytes(word: Self::Word) -> [u8; 16];
    fn word_from_be_bytes(bytes: [u8; 16]) -> Self::Word;
}

/// Values in `[-(2^255 - 1), 2^255 - 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signed;

/// Values in `[0, 2^256 - 1]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unsigned;

const I128_MAX_MAGNITUDE: u128 = i128::MAX as u128;
const I128_MIN_MAGNITUDE: u128 = i128::MIN.unsigned_abs();

impl Signedness for Signed {
    const SIGNED: bool = true;
    const MAX_MAGNITUDE: U256 = U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX >> 1]);
    const MIN_MAGNITUDE: U256 = Self::MAX_MAGNITUDE;

    type Word = i128;

    fn pack(negative: bool, magnitude: U256) -> Result<i128> {
        let limit = if negative {
            I128_MIN_MAGNITUDE
        } else {
            I128_MAX_MAGNITUDE
        };
        if magnitude > U256::from(limit) {
            return Err(NumericError::out_of_range(negative));
        }
        let word = magnitude.low_u128() as i128;
        // i128::MIN maps onto itself under wrapping negation
        Ok(if negative { word.wrapping_neg() } else { word })
    }

    fn unpack(word: i128) -> (bool, U256) {
        (word < 0, U256::from(word.unsigned_abs()))
    }

    fn word_to_be_bytes(word: i128) -> [u8; 16] {
        word.to_be_bytes()
    }

    fn word_from_be_bytes(bytes: [u8; 16]) -> i128 {
        i128::from_be_bytes(bytes)
    }
}

impl Signedness for Unsigned {
    const SIGNED: bool = false;
    const MAX_MAGNITUDE: U256 = U256::MAX;
    const MIN_MAGNITUDE: U256 = U256([0, 0, 0, 0]);

    type Word = u128;

    fn pack(negative: bool, magnitude: U256) -> Result<u128> {
        if negative && !magnitude.is_zero() {
            return Err(NumericError::Underflow);
        }
        if magnitude > U256::from(u128::MAX) {
            return Err(NumericError::Overflow);
        }
        Ok(magnitude.low_u128())
    }

    fn unpack(word: u128) -> (bool, U256) {
        (false, U256::from(word))
    }

    fn word_to_be_bytes(word: u128) -> [u8; 16] {
        word.to_be_bytes()
    }

    fn word_from_be_bytes(bytes: [u8; 16]) -> u128 {
        u128::from_be_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bases() {
        assert_eq!(P6::BASE, crate::math::pow10(6));
        assert_eq!(P18::BASE, crate::math::pow10(18));
    }

    #[test]
    fn test_signed_range_is_symmetric() {
        assert_eq!(Signed::MAX_MAGNITUDE + Signed::MAX_MAGNITUDE + U256::one(), U256::MAX);
        assert_eq!(Signed::MIN_MAGNITUDE, Signed::MAX_MAGNITUDE);
        assert!(Unsigned::MIN_MAGNITUDE.is_zero());
    }

    #[test]
    fn test_signed_pack_edges() {
        assert_eq!(Signed::pack(false, U256::from(I128_MAX_MAGNITUDE)), Ok(i128::MAX));
        assert_eq!(Signed::pack(true, U256::from(I128_MIN_MAGNITUDE)), Ok(i128::MIN));
        assert_eq!(
            Signed::pack(false, U256::from(I128_MIN_MAGNITUDE)),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            Signed::pack(true, U256::from(I128_MIN_MAGNITUDE) + U256::one()),
            Err(NumericError::Underflow)
        );
        assert_eq!(Signed::unpack(i128::MIN), (true, U256::from(I128_MIN_MAGNITUDE)));
    }

    #[test]
    fn test_unsigned_pack_edges() {
        assert_eq!(Unsigned::pack(false, U256::from(u128::MAX)), Ok(u128::MAX));
        assert_eq!(
            Unsigned::pack(false, U256::from(u128::MAX) + U256::one()),
            Err(NumericError::Overflow)
        );
        assert_eq!(Unsigned::pack(true, U256::one()), Err(NumericError::Underflow));
    }
}
