use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::NimError;
use crate::game::{heaps_from_json, validate_heaps};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_ROOT: &str = "/api/nim";
pub const DEFAULT_START_SITUATION: [u32; 4] = [1, 3, 5, 7];

/// Server settings after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub port: u16,
    pub api_root: String,
    pub start_situation: Vec<u32>,
}

// Mirrors the file layout; every field is checked before it becomes a Config.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    port: Option<i64>,
    api_root: Option<String>,
    start_situation: Option<Vec<serde_json::Value>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_root: DEFAULT_API_ROOT.to_string(),
            start_situation: DEFAULT_START_SITUATION.to_vec(),
        }
    }
}

impl Config {
    /// Parse a JSON config; missing keys fall back to the defaults.
    pub fn from_json_str(text: &str) -> Result<Self, NimError> {
        let raw: RawConfig = serde_json::from_str(text).map_err(|e| NimError::config(e.to_string()))?;
        let mut cfg = Config::default();
        if let Some(port) = raw.port { cfg.port = check_port(port)?; }
        if let Some(root) = raw.api_root { cfg.api_root = check_api_root(&root)?; }
        if let Some(values) = raw.start_situation { cfg.start_situation = check_start_situation(heaps_from_json(&values)?)?; }
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::from_json_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    /// Like [`Config::load`], but a missing file means built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply command line values on top of the file values.
    pub fn with_overrides(
        mut self,
        port: Option<i64>,
        api_root: Option<String>,
        heaps: Option<Vec<i64>>,
    ) -> Result<Self, NimError> {
        if let Some(p) = port { self.port = check_port(p)?; }
        if let Some(r) = api_root { self.api_root = check_api_root(&r)?; }
        if let Some(h) = heaps { self.start_situation = check_start_situation(validate_heaps(&h)?)?; }
        Ok(self)
    }
}

fn check_port(port: i64) -> Result<u16, NimError> {
    u16::try_from(port).map_err(|_| NimError::config(format!("port {} is out of range", port)))
}

fn check_api_root(root: &str) -> Result<String, NimError> {
    if !root.starts_with('/') {
        return Err(NimError::config(format!("apiRoot '{}' must start with '/'", root)));
    }
    let trimmed = root.trim_end_matches('/');
    Ok(if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() })
}

fn check_start_situation(heaps: Vec<u32>) -> Result<Vec<u32>, NimError> {
    if heaps.iter().all(|&h| h == 0) {
        return Err(NimError::config("startSituation must not contain only zeros"));
    }
    Ok(heaps)
}
