//! Arithmetic with explicit rounding

use primitive_types::U256;

use super::FixedPoint;
use crate::error::{NumericError, Result};
use crate::math::mul_div;
use crate::precision::{Precision, Signedness, Unsigned};

/// Sum of two sign/magnitude pairs
fn signed_add(a_neg: bool, a_mag: U256, b_neg: bool, b_mag: U256) -> Result<(bool, U256)> {
    if a_neg == b_neg {
        let magnitude = a_mag
            .checked_add(b_mag)
            .ok_or(NumericError::out_of_range(a_neg))?;
        Ok((a_neg, magnitude))
    } else if a_mag >= b_mag {
        Ok((a_neg, a_mag - b_mag))
    } else {
        Ok((b_neg, b_mag - a_mag))
    }
}

impl<P: Precision, S: Signedness> FixedPoint<P, S> {
    /// `a * b / c` on magnitudes with the given sign and rounding
    fn scaled(negative: bool, a: U256, b: U256, c: U256, round_out: bool) -> Result<Self> {
        if c.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let magnitude =
            mul_div(a, b, c, round_out).ok_or(NumericError::out_of_range(negative))?;
        Self::from_parts(negative, magnitude)
    }

    pub fn add(self, rhs: Self) -> Result<Self> {
        let (negative, magnitude) =
            signed_add(self.negative, self.magnitude, rhs.negative, rhs.magnitude)?;
        Self::from_parts(negative, magnitude)
    }

    pub fn sub(self, rhs: Self) -> Result<Self> {
        let (negative, magnitude) =
            signed_add(self.negative, self.magnitude, !rhs.negative, rhs.magnitude)?;
        Self::from_parts(negative, magnitude)
    }

    pub fn neg(self) -> Result<Self> {
        Self::from_parts(!self.negative, self.magnitude)
    }

    /// Product, remainder rounded toward zero
    pub fn mul(self, rhs: Self) -> Result<Self> {
        Self::scaled(
            self.negative ^ rhs.negative,
            self.magnitude,
            rhs.magnitude,
            P::BASE,
            false,
        )
    }

    /// Product, remainder rounded away from zero
    pub fn mul_out(self, rhs: Self) -> Result<Self> {
        Self::scaled(
            self.negative ^ rhs.negative,
            self.magnitude,
            rhs.magnitude,
            P::BASE,
            true,
        )
    }

    /// Quotient, rounded toward zero
    pub fn div(self, rhs: Self) -> Result<Self> {
        Self::scaled(
            self.negative ^ rhs.negative,
            self.magnitude,
            P::BASE,
            rhs.magnitude,
            false,
        )
    }

    /// Quotient, rounded away from zero
    pub fn div_out(self, rhs: Self) -> Result<Self> {
        Self::scaled(
            self.negative ^ rhs.negative,
            self.magnitude,
            P::BASE,
            rhs.magnitude,
            true,
        )
    }

    /// Value substituted for a zero divisor by the unsafe divisions:
    /// `MAX` for a positive dividend, `MIN` for a negative one, `ONE` for zero.
    fn saturated(self) -> Self {
        if self.is_zero() {
            Self::ONE
        } else if self.negative {
            Self::MIN
        } else {
            Self::MAX
        }
    }

    /// `div`, but a zero divisor yields the saturation value instead of an error
    pub fn unsafe_div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Ok(self.saturated());
        }
        self.div(rhs)
    }

    /// `div_out`, but a zero divisor yields the saturation value instead of an error
    pub fn unsafe_div_out(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Ok(self.saturated());
        }
        self.div_out(rhs)
    }

    /// `self * b / c` with a 512-bit intermediate, rounded toward zero
    pub fn muldiv(self, b: Self, c: Self) -> Result<Self> {
        Self::scaled(
            self.negative ^ b.negative ^ c.negative,
            self.magnitude,
            b.magnitude,
            c.magnitude,
            false,
        )
    }

    /// `self * b / c` with a 512-bit intermediate, rounded away from zero
    pub fn muldiv_out(self, b: Self, c: Self) -> Result<Self> {
        Self::scaled(
            self.negative ^ b.negative ^ c.negative,
            self.magnitude,
            b.magnitude,
            c.magnitude,
            true,
        )
    }

    /// `numerator / denominator` of two plain integers, rounded toward zero
    pub fn ratio(numerator: i128, denominator: i128) -> Result<Self> {
        Self::scaled(
            (numerator < 0) ^ (denominator < 0),
            U256::from(numerator.unsigned_abs()),
            P::BASE,
            U256::from(denominator.unsigned_abs()),
            false,
        )
    }
}

impl<P: Precision> FixedPoint<P, Unsigned> {
    /// Difference floored at zero
    pub fn unsafe_sub(self, rhs: Self) -> Self {
        if rhs.magnitude >= self.magnitude {
            return Self::ZERO;
        }
        Self::canonical(false, self.magnitude - rhs.magnitude)
    }
}
