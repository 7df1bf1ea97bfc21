//! Sign and precision conversions

use primitive_types::U256;

use super::{FixedPoint, UFixed};
use crate::error::{NumericError, Result};
use crate::math::{mul_div, pow10};
use crate::precision::{Precision, Signed, Signedness, Unsigned, P18, P6};

impl<P: Precision, S: Signedness> FixedPoint<P, S> {
    /// Unsigned value at the same precision; fails above this type's `MAX`
    pub fn from_unsigned(value: UFixed<P>) -> Result<Self> {
        Self::from_parts(false, value.magnitude)
    }

    /// Rescale to precision `Q`.
    ///
    /// Widening multiplies and may overflow. Narrowing divides, rounding the
    /// magnitude toward zero unless `round_out` is set.
    pub fn convert<Q: Precision>(self, round_out: bool) -> Result<FixedPoint<Q, S>> {
        let magnitude = if Q::DECIMALS >= P::DECIMALS {
            self.magnitude
                .checked_mul(pow10(Q::DECIMALS - P::DECIMALS))
                .ok_or(NumericError::out_of_range(self.negative))?
        } else {
            mul_div(
                self.magnitude,
                U256::one(),
                pow10(P::DECIMALS - Q::DECIMALS),
                round_out,
            )
            .ok_or(NumericError::out_of_range(self.negative))?
        };
        FixedPoint::from_parts(self.negative, magnitude)
    }
}

impl<S: Signedness> FixedPoint<P6, S> {
    /// Widen to 18 decimals
    pub fn to_p18(self) -> Result<FixedPoint<P18, S>> {
        self.convert(false)
    }

    /// Narrow from 18 decimals; the result never leaves the range
    pub fn from_p18(value: FixedPoint<P18, S>, round_out: bool) -> Self {
        let divisor = pow10(P18::DECIMALS - P6::DECIMALS);
        // ceil(m / 10^12) <= m for any m > 0, and 0 maps to 0
        let magnitude = mul_div(value.magnitude, U256::one(), divisor, round_out)
            .unwrap_or(value.magnitude);
        Self::canonical(value.negative, magnitude)
    }
}

impl<P: Precision> FixedPoint<P, Signed> {
    /// `sign * magnitude`; a zero sign yields zero
    pub fn from_sign(sign: i8, magnitude: UFixed<P>) -> Result<Self> {
        match sign {
            0 => Ok(Self::ZERO),
            s => Self::from_parts(s < 0, magnitude.magnitude),
        }
    }
}

impl<P: Precision> FixedPoint<P, Unsigned> {
    /// Fails on negative input
    pub fn from_signed(value: FixedPoint<P, Signed>) -> Result<Self> {
        Self::from_parts(value.negative, value.magnitude)
    }

    /// Negative input becomes zero
    pub fn unsafe_from_signed(value: FixedPoint<P, Signed>) -> Self {
        if value.negative {
            return Self::ZERO;
        }
        Self::canonical(false, value.magnitude)
    }
}
