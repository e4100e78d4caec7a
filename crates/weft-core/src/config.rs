use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::threshold::{DEFAULT_BASE_GAP, DEFAULT_TIERS, ThresholdPolicy, Tier};

/// Relative path of the project-level config file.
pub const CONFIG_PATH: &str = ".weft/config.toml";

/// Environment variable that switches aggregation on or off, overriding the
/// file.
pub const AGGREGATION_ENV: &str = "WEFT_AGGREGATION";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// When false, compaction only validates and leaves the timeline as is.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_base_gap")]
    pub base_gap_secs: i64,
    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_gap_secs: default_base_gap(),
            tiers: default_tiers(),
        }
    }
}

impl AggregationConfig {
    /// Turn the configured gaps into a validated [`ThresholdPolicy`].
    ///
    /// # Errors
    ///
    /// Fails if the tiers are inconsistent (see [`ThresholdPolicy::new`]).
    pub fn policy(&self) -> Result<ThresholdPolicy> {
        ThresholdPolicy::new(self.base_gap_secs, self.tiers.clone())
            .context("invalid [aggregation] thresholds")
    }
}

/// Load `.weft/config.toml` under `project_root`, falling back to defaults
/// when the file does not exist.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_timeline_config(project_root: &Path) -> Result<TimelineConfig> {
    load_config_file(&project_root.join(CONFIG_PATH))
}

/// Load an explicit config file, falling back to defaults when it does not
/// exist.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<TimelineConfig> {
    if !path.exists() {
        return Ok(TimelineConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<TimelineConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the project config and apply the `WEFT_AGGREGATION` override.
///
/// # Errors
///
/// Fails if the config file exists but cannot be read or parsed.
pub fn resolve_config(project_root: &Path) -> Result<TimelineConfig> {
    let mut config = load_timeline_config(project_root)?;
    if let Some(enabled) = parse_switch(env::var(AGGREGATION_ENV).ok().as_deref()) {
        tracing::debug!(enabled, "aggregation toggled from environment");
        config.aggregation.enabled = enabled;
    }
    Ok(config)
}

/// Parse an on/off switch. Unrecognised or missing values yield `None`.
fn parse_switch(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

const fn default_true() -> bool {
    true
}

const fn default_base_gap() -> i64 {
    DEFAULT_BASE_GAP
}

fn default_tiers() -> Vec<Tier> {
    DEFAULT_TIERS.to_vec()
}
