//! Monitor configuration file
//!
//! TOML, every section optional:
//!
//! ```toml
//! [monitor]
//! poll_interval = "100ms"
//! max_consecutive_failures = 50
//!
//! [geometry]
//! base_height = 210.82
//! link1 = 362.32
//! link2 = 322.43
//! link3 = 135.97
//!
//! [calibration.base]
//! home = 15971
//! resolution = 65536
//! ```
//!
//! Missing values fall back to the reference arm.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use scribe_core::{ArmConfig, CalibrationTable, LinkGeometry, ScribeError, ScribeResult};

use crate::MonitorConfig;

/// Everything the monitor binary needs to start
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScribeConfig {
    pub monitor: MonitorConfig,
    pub calibration: CalibrationTable,
    pub geometry: LinkGeometry,
}

impl ScribeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> ScribeResult<Self> {
        let config: ScribeConfig =
            toml::from_str(input).map_err(|e| ScribeError::Config(e.to_string()))?;
        config.arm().validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> ScribeResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .map_err(|e| ScribeError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&input)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn arm(&self) -> ArmConfig {
        ArmConfig::new(self.calibration, self.geometry)
    }
}

/// Human-readable duration ("100ms", "2s")
pub(crate) fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(&text).map_err(serde::de::Error::custom)
}
