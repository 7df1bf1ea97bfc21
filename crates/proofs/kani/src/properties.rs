//! Symbolic property proofs for the arithmetic laws
//!
//! Inputs come from the bounded generators, so each harness covers every
//! value in a small raw window rather than a sampled handful.

use rate_model::{Fixed6, NumericError, UFixed6};

use crate::generators::*;

fn ulp() -> UFixed6 {
    UFixed6::from_raw_i128(1).unwrap_or_default()
}

// === Sign rules ===

/// Product sign is the xor of operand signs, and zero is never negative
#[kani::proof]
fn mul_sign_rule() {
    let a = any_fixed6();
    let b = any_fixed6();

    if let Ok(product) = a.mul(b) {
        if !product.is_zero() {
            assert!(product.is_negative() == (a.is_negative() ^ b.is_negative()),
                "product sign must follow operand signs");
        } else {
            assert!(!product.is_negative(), "zero must be canonical");
        }
    }
}

/// Negation is an involution on the symmetric range
#[kani::proof]
fn neg_involution() {
    let a = any_fixed6();
    let twice = a.neg().and_then(|x| x.neg());
    assert!(twice == Ok(a), "neg(neg(a)) must be a");
}

// === Rounding ===

/// `div` and `div_out` bracket the quotient within one unit
#[kani::proof]
fn div_rounding_bracket() {
    let a = any_fixed6();
    let b = any_fixed6();
    kani::assume(!b.is_zero());

    let down = a.div(b);
    let up = a.div_out(b);
    if let (Ok(down), Ok(up)) = (down, up) {
        assert!(up.abs() >= down.abs(), "div_out must not be smaller than div");
        assert!(up.abs().unsafe_sub(down.abs()) <= ulp(), "div_out exceeds div by at most one unit");
    }
}

/// Division by zero is an error on the checked path and saturates on the unsafe one
#[kani::proof]
fn div_by_zero_rules() {
    let a = any_fixed6();

    assert!(a.div(Fixed6::ZERO) == Err(NumericError::DivisionByZero),
        "checked division by zero must fail");

    let expected = if a.is_zero() {
        Fixed6::ONE
    } else if a.is_negative() {
        Fixed6::MIN
    } else {
        Fixed6::MAX
    };
    assert!(a.unsafe_div(Fixed6::ZERO) == Ok(expected), "unsafe division must saturate");
}

// === Clamping ===

/// Clamping twice is clamping once
#[kani::proof]
fn clamp_idempotent() {
    let x = any_fixed6();
    let upper = Fixed6::from_unsigned(any_ufixed6()).unwrap_or_default();
    let lower = upper.neg().unwrap_or_default();

    let once = x.max(lower).min(upper);
    assert!(once.max(lower).min(upper) == once, "clamp must be idempotent");
    assert!(once >= lower && once <= upper, "clamp must land inside the bounds");
}

// === Persistence ===

/// Packing never changes a value inside the 128-bit window
#[kani::proof]
fn pack_unpack_identity() {
    let a = any_fixed6();
    let packed = a.pack();
    assert!(packed.is_ok(), "bounded values must pack");
    if let Ok(packed) = packed {
        assert!(packed.unpack() == a, "unpack(pack(a)) must be a");
    }
}

// === Controller ===

/// Output stays inside the bounds, and a moving path reports an intercept in the interval
#[kani::proof]
fn controller_output_bounded() {
    let input = any_controller_input();
    let (from, to) = input.interval();

    if let Ok((capped, intercept)) = input.controller().compute(input.value(), input.skew(), from, to) {
        assert!(capped.abs() <= UFixed6::from_u64(input.max), "capped value must respect max");
        if input.skew != 0 {
            assert!(intercept >= UFixed6::from_u64(from), "intercept must not precede from");
            assert!(intercept <= UFixed6::from_u64(to), "intercept must not pass to");
        }
    }
}
