//! User configuration.
//!
//! The config lives at `<config dir>/berth/config.json` unless `--config`
//! names another file. A missing file means defaults.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const STORE_ENV_VAR: &str = "BERTH_STORE";

const APP_DIR: &str = "berth";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_STORE_FILE: &str = "store.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BerthConfig {
    pub schema_version: u32,
    /// Snapshot path or http(s) base URL of the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Options shown at once in selection prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

/// Build the config written by `berth init`.
pub fn default_config() -> BerthConfig {
    BerthConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        store: None,
        page_size: None,
    }
}

/// Return `explicit`, or the per-user config path.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let base = dirs::config_dir().ok_or_else(|| anyhow!("no config directory for this user"))?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Load and validate the config at `path`, falling back to defaults when absent.
pub fn load_config(path: &Path) -> Result<BerthConfig> {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(default_config());
    }
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: BerthConfig = serde_json::from_slice(&bytes).context("parse config JSON")?;
    validate_config(&config)?;
    Ok(config)
}

/// Persist a config in a stable JSON format.
pub fn write_config(path: &Path, config: &BerthConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create config dir")?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize config")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn validate_config(config: &BerthConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.page_size == Some(0) {
        return Err(anyhow!("page_size must be at least 1"));
    }
    if config
        .store
        .as_deref()
        .is_some_and(|store| store.trim().is_empty())
    {
        return Err(anyhow!("store must be non-empty when set"));
    }
    Ok(())
}

/// Pick the store location: flag, then config, then `BERTH_STORE`, then the
/// per-user snapshot file.
pub fn resolve_store_location(
    flag: Option<&str>,
    config: &BerthConfig,
    env_value: Option<String>,
) -> Result<String> {
    let configured = flag
        .map(str::to_string)
        .or_else(|| config.store.clone())
        .or(env_value)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    if let Some(location) = configured {
        return Ok(location);
    }
    let base = dirs::data_local_dir().ok_or_else(|| anyhow!("no data directory for this user"))?;
    Ok(base
        .join(APP_DIR)
        .join(DEFAULT_STORE_FILE)
        .display()
        .to_string())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
