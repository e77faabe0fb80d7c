use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const SEED_ENV_VAR: &str = "ETHVOL_SEED";
/// Upper bounds keep generated dates inside chrono's calendar range.
pub const MAX_HISTORY_DAYS: usize = 100_000;
pub const MAX_HORIZON_DAYS: usize = 100_000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_history_days")]
    pub history_days: usize,
    #[serde(default = "default_forecast_horizon_days")]
    pub forecast_horizon_days: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
    /// Days of history drawn next to the forecast.
    pub history_window: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 250,
            history_window: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_history_days() -> usize {
    365
}

fn default_forecast_horizon_days() -> usize {
    30
}

/// Parse a seed override such as `ETHVOL_SEED=42`. Blank means "no override".
pub fn parse_seed(raw: &str) -> Result<Option<u64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let seed = trimmed
        .parse::<u64>()
        .with_context(|| format!("invalid seed '{}': expected an unsigned integer", raw))?;
    Ok(Some(seed))
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.generator.history_days == 0 || self.generator.history_days > MAX_HISTORY_DAYS {
            bail!(
                "generator.history_days must be in 1..={}, got {}",
                MAX_HISTORY_DAYS,
                self.generator.history_days
            );
        }
        if self.generator.forecast_horizon_days == 0
            || self.generator.forecast_horizon_days > MAX_HORIZON_DAYS
        {
            bail!(
                "generator.forecast_horizon_days must be in 1..={}, got {}",
                MAX_HORIZON_DAYS,
                self.generator.forecast_horizon_days
            );
        }
        if self.ui.history_window == 0 {
            bail!("ui.history_window must be > 0");
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("invalid config in {}", path.display()))?;

        if let Ok(raw) = std::env::var(SEED_ENV_VAR) {
            if let Some(seed) = parse_seed(&raw).context("ETHVOL_SEED is invalid")? {
                config.generator.seed = Some(seed);
            }
        }
        Ok(config)
    }

    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }
}
