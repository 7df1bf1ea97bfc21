//! Proportional controller
//!
//! Extrapolates a rate linearly at `skew / k` per second, clamps it to
//! `[-max, max]`, and reports when the unclamped path hits the bound it
//! saturates against.
//!
//! Intercept rules:
//! - zero skew, value inside the bounds: `NEVER`
//! - zero skew, value outside the bounds: `to`
//! - no clamping: `to`
//! - clamping: the crossing time, rounded toward zero and capped at `to`;
//!   `from` when the value already sits at or past the saturated bound
//! - value past one bound, clamped at the other: the crossing is measured to
//!   the opposite bound, so the funding ramp averages the out-of-bounds start
//!   with that bound

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{NumericError, Result};
use crate::fixed::{Fixed6, UFixed6};

/// Intercept reported when the path never reaches a bound
pub const NEVER: UFixed6 = UFixed6::MAX;

/// Controller parameters, supplied fresh on every call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PController6 {
    /// Gain divisor: seconds of unit skew per unit of rate
    pub k: UFixed6,
    /// Symmetric clamp bound
    pub max: UFixed6,
}

impl PController6 {
    pub fn new(k: UFixed6, max: UFixed6) -> Self {
        Self { k, max }
    }

    /// Returns `(capped_value, intercept_timestamp)`.
    ///
    /// The intercept is a fixed-point timestamp in seconds so that it can be
    /// combined directly with rates by the funding accumulator.
    pub fn compute(
        &self,
        value: Fixed6,
        skew: Fixed6,
        from: u64,
        to: u64,
    ) -> Result<(Fixed6, UFixed6)> {
        if from > to {
            return Err(NumericError::InvalidInterval { from, to });
        }

        let elapsed = Fixed6::from_u64(to - from);
        let raw = value.add(elapsed.muldiv(skew, Fixed6::from_unsigned(self.k)?)?)?;

        let upper = Fixed6::from_unsigned(self.max)?;
        let lower = upper.neg()?;
        let capped = raw.max(lower).min(upper);

        let intercept = Self::intercept(value, skew, raw, capped, (lower, upper), from, to)?;
        if intercept < UFixed6::from_u64(to) {
            debug!(
                "rate saturated at {} (unclamped {}) from t={} within [{}, {}]",
                capped, raw, intercept, from, to
            );
        }
        Ok((capped, intercept))
    }

    fn intercept(
        value: Fixed6,
        skew: Fixed6,
        raw: Fixed6,
        capped: Fixed6,
        (lower, upper): (Fixed6, Fixed6),
        from: u64,
        to: u64,
    ) -> Result<UFixed6> {
        let to_timestamp = UFixed6::from_u64(to);

        if skew.is_zero() {
            let inside = value >= lower && value <= upper;
            return Ok(if inside { NEVER } else { to_timestamp });
        }
        if capped == raw {
            return Ok(to_timestamp);
        }

        let range = raw.sub(value)?;
        if range.is_zero() {
            // Nothing moved, so the value was already past the bound
            return Ok(UFixed6::from_u64(from));
        }

        // Distance left before the saturated bound; zero if already there or past it
        let buffer = if capped == upper {
            upper.sub(value)?
        } else {
            value.sub(lower)?
        };
        let buffer = UFixed6::unsafe_from_signed(buffer);

        let offset = UFixed6::from_u64(to - from).muldiv(buffer, range.abs())?;
        Ok(UFixed6::from_u64(from).add(offset)?.min(to_timestamp))
    }
}
