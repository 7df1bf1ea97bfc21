//! Funding Rate Simulator
//!
//! Replays a schedule of skew observations through the proportional funding
//! controller and reports the cost accrued on a fixed notional.
//!
//! Usage: `funding-sim [config.toml]` or `funding-sim --init [config.toml]`

mod config;
mod replay;

use anyhow::{Context, Result};
use config::Config;
use rate_model::MemoryStore;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let first = args.next();

    if first.as_deref() == Some("--init") {
        let path = Config::resolve_path(args.next());
        return Config::write_default(&path);
    }

    log::info!("Starting funding simulator");

    // Load configuration
    let path = Config::resolve_path(first);
    let config = Config::load_from(&path).unwrap_or_else(|e| {
        log::warn!("{:#}, using default schedule", e);
        Config::default_schedule()
    });

    log::info!(
        "Controller k={} max={}, notional {}, {} observations from t={}",
        config.controller.k,
        config.controller.max,
        config.notional,
        config.observations.len(),
        config.start
    );

    let mut store = MemoryStore::new();
    let reports = replay::replay(&config, &mut store).context("Replay aborted")?;

    for report in &reports {
        log::info!(
            "[{}, {}] skew {} rate {} accrued {} total {}",
            report.from,
            report.to,
            report.skew,
            report.rate,
            report.accrued,
            report.total
        );

        if config.report_json {
            let line = serde_json::to_string(report).context("Failed to serialize report")?;
            println!("{}", line);
        }
    }

    match reports.last() {
        Some(last) => log::info!(
            "Replayed {} intervals, final rate {}, total accrued {}",
            reports.len(),
            last.rate,
            last.total
        ),
        None => log::info!("No observations to replay"),
    }

    Ok(())
}
