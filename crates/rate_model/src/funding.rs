//! Funding accumulator
//!
//! Holds the last controller output and the skew observed at the start of
//! the next interval. Each `accumulate` integrates the annualized rate path
//! over `[from, to]` against a notional:
//!
//! ```text
//!   rate
//!    max |        ________
//!        |      /|        |
//!        |    /  |        |
//!  value |__/    |        |
//!        |  ramp |  flat  |
//!        +--+----+--------+-- t
//!         from intercept  to
//! ```
//!
//! The ramp is a trapezoid `(value + capped) / 2 * (intercept - from)` and the
//! flat part a rectangle `capped * (to - intercept)`; both are scaled by
//! `notional / SECONDS_PER_YEAR`.

use log::trace;

use crate::controller::PController6;
use crate::error::Result;
use crate::fixed::{Fixed6, PackedFixed6, UFixed6};
use crate::storage::{join_halves, split_halves, SlotKey, SlotStore};

/// 365 days
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PAccumulator6 {
    value: Fixed6,
    skew: Fixed6,
}

impl PAccumulator6 {
    pub fn new(value: Fixed6, skew: Fixed6) -> Self {
        Self { value, skew }
    }

    /// Last capped controller output
    pub fn value(&self) -> Fixed6 {
        self.value
    }

    /// Skew in effect from the end of the last interval
    pub fn skew(&self) -> Fixed6 {
        self.skew
    }

    /// Advance over `[from, to]` and return the cost accrued on `notional`.
    ///
    /// The stored skew drives this interval; `skew` takes effect at `to`.
    /// State is only written once every step has succeeded.
    pub fn accumulate(
        &mut self,
        controller: &PController6,
        skew: Fixed6,
        from: u64,
        to: u64,
        notional: Fixed6,
    ) -> Result<Fixed6> {
        let (capped, intercept) = controller.compute(self.value, self.skew, from, to)?;

        let from_timestamp = UFixed6::from_u64(from);
        let to_timestamp = UFixed6::from_u64(to);
        let intercept = intercept.min(to_timestamp).max(from_timestamp);

        // Halve after scaling to keep one more unit of precision
        let ramp = Self::integrate(self.value.add(capped)?, from_timestamp, intercept, notional)?
            .div(Fixed6::from_u64(2))?;
        let flat = Self::integrate(capped, intercept, to_timestamp, notional)?;
        let accrued = ramp.add(flat)?;

        trace!(
            "accumulate [{}, {}]: rate {} -> {}, ramp {}, flat {}",
            from,
            to,
            self.value,
            capped,
            ramp,
            flat
        );

        self.value = capped;
        self.skew = skew;
        Ok(accrued)
    }

    /// `rate * (to - from) * notional / year`, each step rounded toward zero
    fn integrate(rate: Fixed6, from: UFixed6, to: UFixed6, notional: Fixed6) -> Result<Fixed6> {
        let elapsed = Fixed6::from_unsigned(to.sub(from)?)?;
        rate.mul(elapsed)?
            .mul(notional)?
            .div(Fixed6::from_u64(SECONDS_PER_YEAR))
    }

    /// Read `(value, skew)` packed into one slot, value in the high half
    pub fn load<T: SlotStore + ?Sized>(store: &T, key: &SlotKey) -> Result<Self> {
        let (high, low) = split_halves(&store.read(key));
        Ok(Self::new(
            PackedFixed6::from_be_bytes(high).unpack(),
            PackedFixed6::from_be_bytes(low).unpack(),
        ))
    }

    /// Fails without writing if either half exceeds 128 bits
    pub fn save<T: SlotStore + ?Sized>(&self, store: &mut T, key: &SlotKey) -> Result<()> {
        let value = self.value.pack()?;
        let skew = self.skew.pack()?;
        store.write(key, join_halves(value.to_be_bytes(), skew.to_be_bytes()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NumericError;
    use crate::storage::MemoryStore;

    fn whole(n: i128) -> Fixed6 {
        Fixed6::from_integer(n).unwrap()
    }

    fn controller(k: u64, max: u64) -> PController6 {
        PController6::new(UFixed6::from_u64(k), UFixed6::from_u64(max))
    }

    // Notional chosen so that rate * seconds * notional / year is exact
    const NOTIONAL: i128 = 31_536;

    #[test]
    fn test_uncapped_interval_is_one_trapezoid() {
        let mut acc = PAccumulator6::new(whole(500), whole(100));
        let accrued = acc
            .accumulate(&controller(10, 10_000), whole(7), 0, 100, whole(NOTIONAL))
            .unwrap();

        // (500 + 1500) / 2 * 100 * 31536 / 31536000 = 100
        assert_eq!(accrued, whole(100));
        assert_eq!(acc.value(), whole(1_500));
        assert_eq!(acc.skew(), whole(7));
    }

    #[test]
    fn test_capped_interval_splits_at_intercept() {
        let mut acc = PAccumulator6::new(whole(500), whole(100));
        let accrued = acc
            .accumulate(&controller(10, 1_000), Fixed6::ZERO, 0, 100, whole(NOTIONAL))
            .unwrap();

        // ramp (500 + 1000) / 2 * 50 = 37500, flat 1000 * 50 = 50000
        // (37500 + 50000) * 31536 / 31536000 = 87.5
        assert_eq!(accrued, Fixed6::from_raw_i128(87_500_000).unwrap());
        assert_eq!(acc.value(), whole(1_000));
        assert_eq!(acc.skew(), Fixed6::ZERO);
    }

    #[test]
    fn test_negative_rate_is_a_credit() {
        let mut acc = PAccumulator6::new(whole(-500), whole(-100));
        let accrued = acc
            .accumulate(&controller(10, 1_000), Fixed6::ZERO, 0, 100, whole(NOTIONAL))
            .unwrap();
        assert_eq!(accrued, Fixed6::from_raw_i128(-87_500_000).unwrap());
        assert_eq!(acc.value(), whole(-1_000));
    }

    #[test]
    fn test_zero_skew_integrates_whole_interval() {
        let mut acc = PAccumulator6::new(whole(200), Fixed6::ZERO);
        let accrued = acc
            .accumulate(&controller(10, 1_000), Fixed6::ZERO, 0, 1_000, whole(NOTIONAL))
            .unwrap();
        // 200 * 1000 * 31536 / 31536000 = 200
        assert_eq!(accrued, whole(200));
        assert_eq!(acc.value(), whole(200));
    }

    #[test]
    fn test_zero_skew_past_cap_ramps_from_stored_value() {
        // Intercept is `to`, so the whole interval is one trapezoid from the
        // stored 1200 down to the cap: (1200 + 1000) / 2 * 100 = 110 after scaling
        let c = controller(10, 1_000);
        let mut acc = PAccumulator6::new(whole(1_200), Fixed6::ZERO);
        let accrued = acc.accumulate(&c, Fixed6::ZERO, 0, 100, whole(NOTIONAL)).unwrap();
        assert_eq!(accrued, whole(110));
        assert_eq!(acc.value(), whole(1_000));

        // Any non-zero skew reports the intercept at `from` and charges flat at the cap
        for skew in [-1, 1] {
            let mut acc = PAccumulator6::new(whole(1_200), Fixed6::from_raw_i128(skew).unwrap());
            let accrued = acc.accumulate(&c, Fixed6::ZERO, 0, 100, whole(NOTIONAL)).unwrap();
            assert_eq!(accrued, whole(100));
        }
    }

    #[test]
    fn test_already_capped_is_flat() {
        let mut acc = PAccumulator6::new(whole(1_000), whole(10));
        let accrued = acc
            .accumulate(&controller(10, 1_000), whole(10), 0, 100, whole(NOTIONAL))
            .unwrap();
        // 1000 * 100 * 31536 / 31536000 = 100
        assert_eq!(accrued, whole(100));
    }

    #[test]
    fn test_split_interval_matches_single_interval() {
        let c = controller(10, 1_000);

        let mut once = PAccumulator6::new(whole(500), whole(100));
        let total = once.accumulate(&c, whole(100), 0, 100, whole(NOTIONAL)).unwrap();

        let mut twice = PAccumulator6::new(whole(500), whole(100));
        let first = twice.accumulate(&c, whole(100), 0, 40, whole(NOTIONAL)).unwrap();
        let second = twice.accumulate(&c, whole(100), 40, 100, whole(NOTIONAL)).unwrap();

        assert_eq!(first, whole(28));
        assert_eq!(second, Fixed6::from_raw_i128(59_500_000).unwrap());
        assert_eq!(first.add(second).unwrap(), total);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_interval_accrues_nothing() {
        let mut acc = PAccumulator6::new(whole(500), whole(100));
        let accrued = acc
            .accumulate(&controller(10, 1_000), whole(3), 50, 50, whole(NOTIONAL))
            .unwrap();
        assert_eq!(accrued, Fixed6::ZERO);
        assert_eq!(acc.value(), whole(500));
        assert_eq!(acc.skew(), whole(3));
    }

    #[test]
    fn test_invalid_interval_leaves_state() {
        let mut acc = PAccumulator6::new(whole(500), whole(100));
        let before = acc;
        assert_eq!(
            acc.accumulate(&controller(10, 1_000), whole(3), 10, 5, whole(1)),
            Err(NumericError::InvalidInterval { from: 10, to: 5 })
        );
        assert_eq!(acc, before);
    }

    #[test]
    fn test_rounding_is_toward_zero() {
        // 1 * 1s * 1 / 31536000 is far below one unit
        let mut acc = PAccumulator6::new(whole(1), Fixed6::ZERO);
        let accrued = acc
            .accumulate(&controller(1, 10), Fixed6::ZERO, 0, 1, whole(1))
            .unwrap();
        assert_eq!(accrued, Fixed6::ZERO);

        let mut acc = PAccumulator6::new(whole(-1), Fixed6::ZERO);
        let accrued = acc
            .accumulate(&controller(1, 10), Fixed6::ZERO, 0, 1, whole(1))
            .unwrap();
        assert_eq!(accrued, Fixed6::ZERO);
    }

    #[test]
    fn test_load_save() {
        let mut store = MemoryStore::new();
        let key = SlotKey::from(11);
        assert_eq!(PAccumulator6::load(&store, &key), Ok(PAccumulator6::default()));

        let acc = PAccumulator6::new(whole(-3), Fixed6::from_raw_i128(42).unwrap());
        acc.save(&mut store, &key).unwrap();
        assert_eq!(PAccumulator6::load(&store, &key), Ok(acc));
    }

    #[test]
    fn test_save_out_of_packed_range() {
        let mut store = MemoryStore::new();
        let key = SlotKey::from(12);
        let acc = PAccumulator6::new(Fixed6::MAX, Fixed6::ZERO);
        assert_eq!(acc.save(&mut store, &key), Err(NumericError::Overflow));
        assert!(store.is_empty());
    }
}
