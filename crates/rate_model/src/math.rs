//! Full-width integer helpers - every product is formed in 512 bits

use primitive_types::{U256, U512};

/// Widen a 256-bit value to 512 bits
#[inline]
pub fn widen(x: U256) -> U512 {
    let U256(l) = x;
    U512([l[0], l[1], l[2], l[3], 0, 0, 0, 0])
}

/// Narrow a 512-bit value, None if the upper half is populated
#[inline]
pub fn narrow(x: U512) -> Option<U256> {
    let U512(l) = x;
    if l[4..].iter().any(|&limb| limb != 0) {
        return None;
    }
    Some(U256([l[0], l[1], l[2], l[3]]))
}

/// floor(a * b / c)
///
/// Returns None if `c` is zero or the quotient does not fit in 256 bits.
#[inline]
pub fn mul_div_floor(a: U256, b: U256, c: U256) -> Option<U256> {
    if c.is_zero() {
        return None;
    }
    narrow(widen(a) * widen(b) / widen(c))
}

/// ceil(a * b / c)
///
/// Returns None if `c` is zero or the quotient does not fit in 256 bits.
#[inline]
pub fn mul_div_ceil(a: U256, b: U256, c: U256) -> Option<U256> {
    if c.is_zero() {
        return None;
    }
    let (quotient, remainder) = (widen(a) * widen(b)).div_mod(widen(c));
    let quotient = if remainder.is_zero() {
        quotient
    } else {
        // Cannot wrap: quotient <= (2^256-1)^2 < 2^512-1
        quotient + U512::one()
    };
    narrow(quotient)
}

/// Rounded magnitude quotient, direction picked by `round_out`
#[inline]
pub fn mul_div(a: U256, b: U256, c: U256, round_out: bool) -> Option<U256> {
    if round_out {
        mul_div_ceil(a, b, c)
    } else {
        mul_div_floor(a, b, c)
    }
}

/// 10^exp as a 256-bit integer (exp <= 77)
#[inline]
pub fn pow10(exp: u32) -> U256 {
    U256::exp10(exp as usize)
}
