//! Decimal text form, used by `Display`, `FromStr` and serde

use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;

use primitive_types::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::FixedPoint;
use crate::error::NumericError;
use crate::precision::{Precision, Signedness};

impl<P: Precision, S: Signedness> fmt::Display for FixedPoint<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (integer, fraction) = self.magnitude.div_mod(P::BASE);
        if self.negative {
            f.write_str("-")?;
        }
        write!(
            f,
            "{}.{:0width$}",
            integer,
            fraction.low_u64(),
            width = P::DECIMALS as usize
        )
    }
}

impl<P: Precision, S: Signedness> FromStr for FixedPoint<P, S> {
    type Err = NumericError;

    /// Accepts `[+-]digits[.digits]` with at most `DECIMALS` fractional digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        if integer.is_empty() && fraction.is_empty() {
            return Err(NumericError::InvalidLiteral);
        }
        if !integer.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
            || fraction.len() > P::DECIMALS as usize
        {
            return Err(NumericError::InvalidLiteral);
        }

        let whole = if integer.is_empty() {
            U256::zero()
        } else {
            // Digits were validated, so a failure here is a too-long literal
            U256::from_dec_str(integer).map_err(|_| NumericError::out_of_range(negative))?
        };
        let mut frac: u64 = 0;
        for b in fraction.bytes() {
            frac = frac * 10 + u64::from(b - b'0');
        }
        frac *= 10u64.pow(P::DECIMALS - fraction.len() as u32);

        let magnitude = whole
            .checked_mul(P::BASE)
            .and_then(|m| m.checked_add(U256::from(frac)))
            .ok_or(NumericError::out_of_range(negative))?;
        Self::from_parts(negative, magnitude)
    }
}

impl<P: Precision, S: Signedness> Serialize for FixedPoint<P, S> {
    fn serialize<T: Serializer>(&self, serializer: T) -> Result<T::Ok, T::Error> {
        serializer.collect_str(self)
    }
}

struct FixedPointVisitor<P, S>(PhantomData<(P, S)>);

impl<'de, P: Precision, S: Signedness> Visitor<'de> for FixedPointVisitor<P, S> {
    type Value = FixedPoint<P, S>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or an integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        FixedPoint::from_integer(i128::from(v)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(FixedPoint::from_u64(v))
    }
}

impl<'de, P: Precision, S: Signedness> Deserialize<'de> for FixedPoint<P, S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FixedPointVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::NumericError;
    use crate::fixed::{Fixed18, Fixed6, UFixed6};

    #[test]
    fn test_display() {
        assert_eq!(Fixed6::from_raw_i128(-1_500_000).unwrap().to_string(), "-1.500000");
        assert_eq!(Fixed6::from_raw_i128(7).unwrap().to_string(), "0.000007");
        assert_eq!(UFixed6::ZERO.to_string(), "0.000000");
        assert_eq!(
            Fixed18::from_integer(12).unwrap().to_string(),
            "12.000000000000000000"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("1.5".parse::<Fixed6>(), Ok(Fixed6::from_raw_i128(1_500_000).unwrap()));
        assert_eq!("-0.000001".parse::<Fixed6>(), Ok(Fixed6::from_raw_i128(-1).unwrap()));
        assert_eq!("+42".parse::<Fixed6>(), Ok(Fixed6::from_integer(42).unwrap()));
        assert_eq!(".25".parse::<Fixed6>(), Ok(Fixed6::from_raw_i128(250_000).unwrap()));
        assert_eq!("3.".parse::<Fixed6>(), Ok(Fixed6::from_integer(3).unwrap()));
        assert_eq!("-0".parse::<Fixed6>(), Ok(Fixed6::ZERO));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!("".parse::<Fixed6>(), Err(NumericError::InvalidLiteral));
        assert_eq!("-".parse::<Fixed6>(), Err(NumericError::InvalidLiteral));
        assert_eq!("1.0000001".parse::<Fixed6>(), Err(NumericError::InvalidLiteral));
        assert_eq!("1e6".parse::<Fixed6>(), Err(NumericError::InvalidLiteral));
        assert_eq!("1.-5".parse::<Fixed6>(), Err(NumericError::InvalidLiteral));
        assert_eq!("-1".parse::<UFixed6>(), Err(NumericError::Underflow));
    }

    #[test]
    fn test_parse_out_of_range() {
        let huge = "9".repeat(80);
        assert_eq!(huge.parse::<Fixed6>(), Err(NumericError::Overflow));
        assert_eq!(format!("-{}", huge).parse::<Fixed6>(), Err(NumericError::Underflow));
    }

    #[test]
    fn test_display_parse_agree() {
        for raw in [-123_456_789i128, -1, 0, 1, 999_999, 1_000_000, 31_536_000_000_000] {
            let x = Fixed6::from_raw_i128(raw).unwrap();
            assert_eq!(x.to_string().parse::<Fixed6>(), Ok(x));
        }
    }

    #[test]
    fn test_serde_json() {
        let x = Fixed6::from_raw_i128(-2_500_000).unwrap();
        let json = serde_json::to_string(&x).unwrap();
        assert_eq!(json, "\"-2.500000\"");
        assert_eq!(serde_json::from_str::<Fixed6>(&json).unwrap(), x);
        assert_eq!(serde_json::from_str::<Fixed6>("-3").unwrap(), Fixed6::from_integer(-3).unwrap());
        assert_eq!(serde_json::from_str::<UFixed6>("4").unwrap(), UFixed6::from_integer(4).unwrap());
        assert!(serde_json::from_str::<UFixed6>("\"-1\"").is_err());
    }
}
