//! Generators for arbitrary inputs (for Kani)

#[cfg(kani)]
use kani::any;
#[cfg(kani)]
use rate_model::{Accumulator6, Fixed6, PAccumulator6, UFixed6};

#[cfg(kani)]
use crate::sanitizer::*;

// Small raw widths keep the 512-bit intermediates tractable
#[cfg(kani)]
pub fn any_fixed6() -> Fixed6 {
    let raw: i32 = any();
    fixed6(raw as i128)
}

#[cfg(kani)]
pub fn any_ufixed6() -> UFixed6 {
    let raw: u32 = any();
    ufixed6(raw as u128)
}

#[cfg(kani)]
pub fn any_nonzero_ufixed6() -> UFixed6 {
    let raw: u32 = any();
    ufixed6((raw as u128).max(1))
}

#[cfg(kani)]
pub fn any_controller_input() -> ControllerInput {
    ControllerInput {
        k: any::<u8>() as u64,
        max: any::<u16>() as u64,
        value: any::<i32>() as i128,
        skew: any::<i32>() as i128,
        from: any::<u16>() as u64,
        elapsed: any::<u16>() as u64,
    }
    .sanitize()
}

#[cfg(kani)]
pub fn any_accumulator() -> Accumulator6 {
    Accumulator6::new(any_fixed6())
}

/// Funding state whose value sits inside `[-max, max]`
#[cfg(kani)]
pub fn any_funding_state(max: u64) -> PAccumulator6 {
    let value = any_fixed6();
    kani::assume(value.abs() <= UFixed6::from_u64(max));
    PAccumulator6::new(value, any_fixed6())
}
