//! Simulator configuration

use anyhow::{Context, Result};
use rate_model::{Fixed6, PController6, UFixed6};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "FUNDING_SIM_CONFIG";
pub const DEFAULT_PATH: &str = "funding-sim.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Position size the cost is accrued on
    pub notional: Fixed6,

    /// Timestamp of the initial state
    pub start: u64,

    /// Also print one JSON line per interval
    #[serde(default)]
    pub report_json: bool,

    /// Controller gain and clamp
    pub controller: PController6,

    /// Funding state at `start`
    pub initial: InitialState,

    /// Skew observations, non-decreasing in time
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    pub value: Fixed6,
    pub skew: Fixed6,
}

/// Skew taking effect at `timestamp`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: u64,
    pub skew: Fixed6,
}

impl Config {
    /// Config path: explicit argument, then `FUNDING_SIM_CONFIG`, then the default
    pub fn resolve_path(arg: Option<String>) -> String {
        let path = arg
            .or_else(|| std::env::var(CONFIG_ENV).ok())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());
        shellexpand::tilde(&path).into_owned()
    }

    /// Load configuration from TOML file
    pub fn load_from(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config TOML")?;

        Ok(config)
    }

    /// Hourly schedule swinging from long to short skew
    pub fn default_schedule() -> Self {
        let start = 1_700_000_000;
        let skews: [i128; 6] = [250_000, 500_000, 500_000, -100_000, -750_000, 0];

        let observations = skews
            .iter()
            .zip(1u64..)
            .map(|(&skew, hour)| Observation {
                timestamp: start + hour * 3_600,
                skew: Fixed6::from_raw_i128(skew).unwrap_or_default(),
            })
            .collect();

        Self {
            notional: Fixed6::from_u64(100_000),
            start,
            report_json: false,
            controller: PController6::new(
                UFixed6::from_u64(40_000),
                UFixed6::from_raw_i128(1_200_000).unwrap_or_default(), // 120% a year
            ),
            initial: InitialState {
                value: Fixed6::ZERO,
                skew: Fixed6::ZERO,
            },
            observations,
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_schedule();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}
