//! Fixed-point rate model
//! 256-bit decimal arithmetic, checkpoint accumulators, and a proportional
//! funding-rate controller with its cost integral. No panics on arithmetic
//! paths; every fallible operation returns `NumericError`.

pub mod error;
pub mod math;
pub mod precision;
pub mod fixed;
pub mod storage;
pub mod accumulator;
pub mod controller;
pub mod funding;

// Re-export commonly used types
pub use error::NumericError;
pub use precision::*;
pub use fixed::*;
pub use storage::{MemoryStore, Slot, SlotKey, SlotStore, ZERO_SLOT};
pub use accumulator::*;
pub use controller::*;
pub use funding::*;
