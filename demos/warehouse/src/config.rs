//! Demo run configuration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use fm_core::FleetConfig;
use serde::{Deserialize, Serialize};

/// Settings for one headless run.  Every key is optional in the JSON file.
///
/// ```json
/// { "robots": 6, "seed": 7, "fleet": { "step_interval_ms": 250 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Robots to spawn at random free vertices.
    pub robots:            usize,
    /// Fleet-size ceiling; spawns past it are refused before reaching the fleet.
    pub max_robots:        usize,
    pub seed:              u64,
    /// Nav-graph level to load; first level when absent.
    pub level:             Option<String>,
    pub output_dir:        String,
    /// How often idle robots are handed new destinations.
    pub dispatch_every_ms: u64,
    pub fleet:             FleetConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            robots:            6,
            max_robots:        10,
            seed:              42,
            level:             None,
            output_dir:        "output/warehouse".into(),
            dispatch_every_ms: 2_000,
            fleet:             FleetConfig { snapshot_interval_ms: 1_000, ..FleetConfig::default() },
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("malformed config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.dispatch_every_ms == 0 {
            bail!("dispatch_every_ms must be > 0");
        }
        self.fleet.validate()?;
        Ok(())
    }
}
