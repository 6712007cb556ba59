//! Configuration file for tabletprops
//!
//! Optional TOML file at `~/.config/tabletprops/config.toml`. Every field has
//! a default, so a missing file means default behavior.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::command::{DEFAULT_TIMEOUT_MS, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Log level used when LOG_LEVEL is not set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// xsetwacom binary, resolved through PATH when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xsetwacom_path: Option<PathBuf>,

    /// Upper bound for a single xsetwacom invocation
    pub command_timeout_ms: u64,

    /// Treat a non-zero xsetwacom exit status as failure even without error output
    pub check_exit_status: bool,

    /// Device name → (hardware button number → X11 button number)
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub button_maps: HashMap<String, HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            xsetwacom_path: None,
            command_timeout_ms: DEFAULT_TIMEOUT_MS,
            check_exit_status: false,
            button_maps: HashMap::new(),
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from `explicit` if given (must exist), else from the default path
    /// (defaults when absent)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    info!("Config file not found at {:?}, using defaults", path);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let mut config = Self::parse(&contents)
            .with_context(|| format!("Failed to parse TOML from {:?}", path))?;
        config.validate_and_clamp();
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Clamp values to safe ranges
    fn validate_and_clamp(&mut self) {
        self.command_timeout_ms = clamp_timeout_ms(self.command_timeout_ms);
    }

    /// Timeout for one tool call; `override_ms` (from the command line) wins
    /// but is held to the same range as the file value
    pub fn command_timeout(&self, override_ms: Option<u64>) -> Duration {
        let ms = override_ms.map_or(self.command_timeout_ms, clamp_timeout_ms);
        Duration::from_millis(ms)
    }

    /// Button map for `device`, empty when none is configured
    pub fn button_map(&self, device: &str) -> HashMap<String, String> {
        self.button_maps.get(device).cloned().unwrap_or_default()
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}

fn clamp_timeout_ms(ms: u64) -> u64 {
    if ms < MIN_TIMEOUT_MS {
        warn!(command_timeout_ms = ms, min = MIN_TIMEOUT_MS, "command_timeout_ms below minimum, clamping");
        MIN_TIMEOUT_MS
    } else if ms > MAX_TIMEOUT_MS {
        warn!(command_timeout_ms = ms, max = MAX_TIMEOUT_MS, "command_timeout_ms exceeds maximum, clamping");
        MAX_TIMEOUT_MS
    } else {
        ms
    }
}
