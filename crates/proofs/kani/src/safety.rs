//! Kani safety proofs for state transitions
//!
//! State only moves on success, for both accumulators.

use kani::any;
use rate_model::{Fixed6, PController6, UFixed6};

use crate::{adversary::*, generators::*, sanitizer::*};

/// A rejected accumulator step never mutates the running total
#[kani::proof]
fn accumulator_failed_step_is_atomic() {
    let mut acc = any_accumulator();
    let before = acc;

    let result = apply_step(&mut acc, any::<Step>(), any_fixed6(), any_ufixed6());
    if result.is_err() {
        assert!(acc == before, "failed step must leave the accumulator unchanged");
    }
}

/// Increment then decrement by the same amount restores the total
#[kani::proof]
fn accumulator_round_trip() {
    let mut acc = any_accumulator();
    let before = acc;
    let amount = any_fixed6();
    let total = any_nonzero_ufixed6();

    if apply_step(&mut acc, Step::Increment, amount, total).is_ok() {
        let undone = apply_step(&mut acc, Step::Decrement, amount, total);
        assert!(undone.is_ok(), "the inverse step must succeed");
        assert!(acc == before, "round trip must restore the accumulator");
    }
}

/// Adversarial step sequences never panic and never leave a non-canonical zero
#[kani::proof]
#[kani::unwind(5)]
fn accumulator_survives_adversary() {
    let mut acc = any_accumulator();

    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        acc = adversary_step(acc);
        let value = acc.accumulator();
        assert!(!(value.is_zero() && value.is_negative()), "zero must stay canonical");
    }
}

/// A reversed interval is rejected before anything is written
#[kani::proof]
fn funding_rejects_reversed_interval() {
    let controller = PController6::new(UFixed6::from_u64(10), UFixed6::from_u64(1_000));
    let mut acc = any_funding_state(1_000);
    let before = acc;

    let from: u64 = any();
    let to: u64 = any();
    kani::assume(from > to);

    let result = acc.accumulate(&controller, any_fixed6(), from, to, Fixed6::ONE);
    assert!(result.is_err(), "reversed interval must fail");
    assert!(acc == before, "failed accumulate must leave state unchanged");
}

/// Zero notional accrues nothing, whatever the path
#[kani::proof]
fn funding_zero_notional_is_free() {
    let input = any_controller_input();
    let (from, to) = input.interval();
    let mut acc = any_funding_state(input.max);

    if let Ok(accrued) = acc.accumulate(&input.controller(), input.skew(), from, to, Fixed6::ZERO) {
        assert!(accrued.is_zero(), "zero notional must accrue zero");
    }
}
