//! Checkpoint accumulator
//!
//! A running total advanced by `amount / total` steps. Two snapshots of the
//! same accumulator give the per-unit delta between them, which
//! `accumulated` scales back up by a total.

use crate::error::Result;
use crate::fixed::{FixedPoint, UFixed};
use crate::precision::{Precision, Signed, Signedness, Unsigned, P18, P6};
use crate::storage::{SlotKey, SlotStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accumulator<P: Precision, S: Signedness> {
    value: FixedPoint<P, S>,
}

pub type Accumulator6 = Accumulator<P6, Signed>;
pub type UAccumulator6 = Accumulator<P6, Unsigned>;
pub type Accumulator18 = Accumulator<P18, Signed>;
pub type UAccumulator18 = Accumulator<P18, Unsigned>;

impl<P: Precision, S: Signedness> Accumulator<P, S> {
    pub fn new(value: FixedPoint<P, S>) -> Self {
        Self { value }
    }

    /// Current running total
    pub fn accumulator(&self) -> FixedPoint<P, S> {
        self.value
    }

    /// `value += amount / total`, rounded toward zero.
    ///
    /// A zero amount is a no-op, so `total` may only be zero alongside it.
    pub fn increment(&mut self, amount: FixedPoint<P, S>, total: UFixed<P>) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let step = amount.div(FixedPoint::from_unsigned(total)?)?;
        self.value = self.value.add(step)?;
        Ok(())
    }

    /// `value -= amount / total`, rounded toward zero
    pub fn decrement(&mut self, amount: FixedPoint<P, S>, total: UFixed<P>) -> Result<()> {
        if amount.is_zero() {
            return Ok(());
        }
        let step = amount.div(FixedPoint::from_unsigned(total)?)?;
        self.value = self.value.sub(step)?;
        Ok(())
    }

    /// `(self - from) * total`, rounded toward zero
    pub fn accumulated(&self, from: &Self, total: UFixed<P>) -> Result<FixedPoint<P, S>> {
        self.value
            .sub(from.value)?
            .mul(FixedPoint::from_unsigned(total)?)
    }

    pub fn load<T: SlotStore + ?Sized>(store: &T, key: &SlotKey) -> Result<Self> {
        Ok(Self::new(FixedPoint::read(store, key)?))
    }

    pub fn save<T: SlotStore + ?Sized>(&self, store: &mut T, key: &SlotKey) {
        self.value.store(store, key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NumericError;
    use crate::fixed::{Fixed6, UFixed6};
    use crate::storage::MemoryStore;

    fn f6(raw: i128) -> Fixed6 {
        Fixed6::from_raw_i128(raw).unwrap()
    }

    fn u6(raw: i128) -> UFixed6 {
        UFixed6::from_raw_i128(raw).unwrap()
    }

    #[test]
    fn test_increment_then_negative_increment() {
        let mut acc = Accumulator6::default();
        acc.increment(f6(2_000_000), u6(1_000_000)).unwrap();
        acc.increment(f6(-3_000_000), u6(1_000_000)).unwrap();
        assert_eq!(acc.accumulator(), f6(-1_000_000));
    }

    #[test]
    fn test_increment_rounds_toward_zero() {
        let mut acc = Accumulator6::default();
        // 1 / 3 per unit
        acc.increment(f6(1_000_000), u6(3_000_000)).unwrap();
        assert_eq!(acc.accumulator(), f6(333_333));

        let mut acc = Accumulator6::default();
        acc.increment(f6(-1_000_000), u6(3_000_000)).unwrap();
        assert_eq!(acc.accumulator(), f6(-333_333));
    }

    #[test]
    fn test_decrement() {
        let mut acc = Accumulator6::new(f6(5_000_000));
        acc.decrement(f6(4_000_000), u6(2_000_000)).unwrap();
        assert_eq!(acc.accumulator(), f6(3_000_000));
        acc.decrement(f6(-1_000_000), u6(1_000_000)).unwrap();
        assert_eq!(acc.accumulator(), f6(4_000_000));
    }

    #[test]
    fn test_zero_total() {
        let mut acc = Accumulator6::default();
        assert_eq!(
            acc.increment(f6(1), UFixed6::ZERO),
            Err(NumericError::DivisionByZero)
        );
        assert_eq!(
            acc.decrement(f6(1), UFixed6::ZERO),
            Err(NumericError::DivisionByZero)
        );
        // Zero amount skips the division entirely
        assert_eq!(acc.increment(Fixed6::ZERO, UFixed6::ZERO), Ok(()));
        assert_eq!(acc.accumulator(), Fixed6::ZERO);
    }

    #[test]
    fn test_failed_step_leaves_value() {
        let mut acc = Accumulator6::new(Fixed6::MAX);
        assert_eq!(
            acc.increment(f6(1_000_000), u6(1_000_000)),
            Err(NumericError::Overflow)
        );
        assert_eq!(acc.accumulator(), Fixed6::MAX);
    }

    #[test]
    fn test_accumulated_since_checkpoint() {
        let mut acc = Accumulator6::default();
        acc.increment(f6(10_000_000), u6(4_000_000)).unwrap();
        let checkpoint = acc;

        acc.increment(f6(6_000_000), u6(4_000_000)).unwrap();
        // per-unit delta 1.5, over 2 units
        assert_eq!(acc.accumulated(&checkpoint, u6(2_000_000)), Ok(f6(3_000_000)));
        assert_eq!(checkpoint.accumulated(&acc, u6(2_000_000)), Ok(f6(-3_000_000)));
    }

    #[test]
    fn test_unsigned_decrement_below_zero() {
        let mut acc = UAccumulator6::default();
        acc.increment(u6(1_000_000), u6(1_000_000)).unwrap();
        assert_eq!(
            acc.decrement(u6(2_000_000), u6(1_000_000)),
            Err(NumericError::Underflow)
        );
        assert_eq!(acc.accumulator(), u6(1_000_000));
    }

    #[test]
    fn test_load_save() {
        let mut store = MemoryStore::new();
        let key = SlotKey::from(9);
        assert_eq!(Accumulator6::load(&store, &key), Ok(Accumulator6::default()));

        let acc = Accumulator6::new(f6(-77));
        acc.save(&mut store, &key);
        assert_eq!(Accumulator6::load(&store, &key), Ok(acc));
    }
}
