//! Schedule replay through the funding accumulator

use anyhow::{Context, Result};
use rate_model::{Fixed6, PAccumulator6, SlotKey, SlotStore};
use serde::Serialize;

use crate::config::Config;

/// Slot holding the funding checkpoint
pub const FUNDING_SLOT: u64 = 0;

/// One replayed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalReport {
    pub from: u64,
    pub to: u64,
    /// Skew observed at `to`
    pub skew: Fixed6,
    /// Controller output at `to`
    pub rate: Fixed6,
    pub accrued: Fixed6,
    /// Running total including this interval
    pub total: Fixed6,
}

/// Seed the checkpoint and accumulate each interval of the schedule.
///
/// The checkpoint round-trips through `store` between intervals, the way a
/// persisted market would load and save it per update.
pub fn replay<T: SlotStore>(config: &Config, store: &mut T) -> Result<Vec<IntervalReport>> {
    let key = SlotKey::from(FUNDING_SLOT);
    PAccumulator6::new(config.initial.value, config.initial.skew)
        .save(store, &key)
        .context("Failed to seed funding checkpoint")?;

    let mut reports = Vec::with_capacity(config.observations.len());
    let mut total = Fixed6::ZERO;
    let mut from = config.start;

    for observation in &config.observations {
        let to = observation.timestamp;

        let mut funding = PAccumulator6::load(&*store, &key)
            .context("Failed to load funding checkpoint")?;
        let accrued = funding
            .accumulate(&config.controller, observation.skew, from, to, config.notional)
            .with_context(|| format!("Failed to accumulate interval [{}, {}]", from, to))?;
        funding
            .save(store, &key)
            .with_context(|| format!("Failed to save funding checkpoint at {}", to))?;

        total = total.add(accrued).context("Running total out of range")?;
        log::debug!("interval [{}, {}] accrued {}", from, to, accrued);

        reports.push(IntervalReport {
            from,
            to,
            skew: observation.skew,
            rate: funding.value(),
            accrued,
            total,
        });
        from = to;
    }

    Ok(reports)
}
