//! Minimal Kani proofs using concrete values
//! The reference scenarios, checked end to end through the 512-bit paths

use rate_model::{Accumulator6, Fixed6, PAccumulator6, PController6, UFixed6};

fn whole(n: u64) -> Fixed6 {
    Fixed6::from_u64(n)
}

/// Uncapped extrapolation reports the interval end
#[kani::proof]
fn concrete_controller_uncapped() {
    let controller = PController6::new(UFixed6::from_u64(10), UFixed6::from_u64(10_000));
    let result = controller.compute(whole(500), whole(100), 0, 100);

    assert!(result == Ok((whole(1_500), UFixed6::from_u64(100))),
        "uncapped path must end at 1500 with intercept at `to`");
}

/// Clamped extrapolation crosses halfway
#[kani::proof]
fn concrete_controller_clamped() {
    let controller = PController6::new(UFixed6::from_u64(10), UFixed6::from_u64(1_000));
    let result = controller.compute(whole(500), whole(100), 0, 100);

    assert!(result == Ok((whole(1_000), UFixed6::from_u64(50))),
        "clamped path must stop at max with intercept at 50");
}

/// Two increments net out to the difference
#[kani::proof]
fn concrete_accumulator_net() {
    let mut acc = Accumulator6::default();
    let first = acc.increment(whole(2), UFixed6::ONE);
    let second = acc.increment(whole(3).neg().unwrap_or_default(), UFixed6::ONE);

    assert!(first.is_ok() && second.is_ok(), "unit-total increments must succeed");
    assert!(acc.accumulator() == Fixed6::NEG_ONE, "2 then -3 must leave -1");
}

/// Clamped funding splits into ramp plus flat
#[kani::proof]
fn concrete_funding_clamped() {
    let controller = PController6::new(UFixed6::from_u64(10), UFixed6::from_u64(1_000));
    let mut acc = PAccumulator6::new(whole(500), whole(100));
    let accrued = acc.accumulate(&controller, Fixed6::ZERO, 0, 100, whole(31_536));

    assert!(accrued == Fixed6::from_raw_i128(87_500_000), "ramp 37.5 plus flat 50");
    assert!(acc.value() == whole(1_000), "state must hold the capped value");
}
