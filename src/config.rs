//! Optional JSON settings file.
//!
//! Every field is optional; a flag given on the command line overrides the
//! file, and the file overrides the built-in default.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MISSING_LIMIT: usize = 20;

/// Settings as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VerifyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_weekday: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix_missing_dates: Option<bool>,
}

/// Command-line values that can override the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub missing_limit: Option<usize>,
    /// Boolean flags only ever turn a setting on.
    pub debug_weekday: bool,
    pub fix_missing_dates: bool,
}

/// Final settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub missing_limit: usize,
    pub debug_weekday: bool,
    pub fix_missing_dates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            missing_limit: DEFAULT_MISSING_LIMIT,
            debug_weekday: false,
            fix_missing_dates: false,
        }
    }
}

/// Load a config file, attaching the path to read and parse errors.
pub fn load_config(path: &Path) -> Result<VerifyConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: VerifyConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

/// Combine defaults, the optional config file, and command-line overrides.
pub fn resolve_settings(config: Option<&VerifyConfig>, overrides: &Overrides) -> Settings {
    let defaults = Settings::default();
    let file = config.cloned().unwrap_or_default();
    Settings {
        missing_limit: overrides
            .missing_limit
            .or(file.missing_limit)
            .unwrap_or(defaults.missing_limit),
        debug_weekday: overrides.debug_weekday
            || file.debug_weekday.unwrap_or(defaults.debug_weekday),
        fix_missing_dates: overrides.fix_missing_dates
            || file.fix_missing_dates.unwrap_or(defaults.fix_missing_dates),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
