//! Kani proofs for the rate model

#![cfg_attr(kani, feature(register_tool), register_tool(kanitool))]

pub mod sanitizer;
pub mod generators;
pub mod adversary;

#[cfg(kani)]
pub mod minimal;
#[cfg(kani)]
pub mod properties;
#[cfg(kani)]
pub mod safety;
