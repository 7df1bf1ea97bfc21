//! Adversarial step generator for the checkpoint accumulator

#[cfg(kani)]
use kani::any;
use rate_model::{Accumulator6, Fixed6, NumericError, UFixed6};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increment,
    Decrement,
    /// Zero amount against a zero total
    Idle,
}

#[cfg(kani)]
impl kani::Arbitrary for Step {
    fn any() -> Self {
        let choice: u8 = any();
        match choice % 3 {
            0 => Step::Increment,
            1 => Step::Decrement,
            _ => Step::Idle,
        }
    }
}

/// Apply one step; a failing step leaves `acc` untouched
pub fn apply_step(
    acc: &mut Accumulator6,
    step: Step,
    amount: Fixed6,
    total: UFixed6,
) -> Result<(), NumericError> {
    match step {
        Step::Increment => acc.increment(amount, total),
        Step::Decrement => acc.decrement(amount, total),
        Step::Idle => acc.increment(Fixed6::ZERO, UFixed6::ZERO),
    }
}

#[cfg(kani)]
pub fn adversary_step(mut acc: Accumulator6) -> Accumulator6 {
    let amount = crate::generators::any_fixed6();
    let total = crate::generators::any_ufixed6();
    // Errors are part of the adversary's moves; the state must survive them
    let _ = apply_step(&mut acc, any::<Step>(), amount, total);
    acc
}
