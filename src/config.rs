//! Waybill configuration.
//!
//! Loaded from `~/.waybill/config.toml`, then overridden by environment:
//!
//! 1. `WAYBILL_API_URL` / `WAYBILL_TOKEN`: process/session level
//! 2. `~/.waybill/config.toml`: persistent defaults
//!
//! Only commands that talk to the backend need a configuration.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

const API_URL_VAR: &str = "WAYBILL_API_URL";
const TOKEN_VAR: &str = "WAYBILL_TOKEN";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Waybill configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Base URL of the backend API, e.g. `https://example.com/api`.
    pub api_base_url: String,

    /// Bearer token sent with every request, if set.
    pub token: Option<String>,

    /// Request timeout for backend calls.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from `~/.waybill/config.toml` and the environment.
    ///
    /// A missing file is fine as long as the environment supplies the API
    /// URL. Returns an error if the file is invalid or no API URL is set.
    pub fn load() -> Result<Self, String> {
        let path = Self::path().ok_or("could not determine home directory")?;
        let mut config = Self::read(&path)?.unwrap_or_default();
        config.apply_overrides(|name| env::var(name).ok());
        config.validate(&path)?;
        Ok(config)
    }

    /// The config file path: `~/.waybill/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".waybill").join("config.toml"))
    }

    /// Read and parse a config file, or `None` if it doesn't exist.
    fn read(path: &Path) -> Result<Option<Self>, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents)
            .map(Some)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// Apply non-empty environment values over the file's.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(API_URL_VAR).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(token) = var(TOKEN_VAR).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
    }

    fn validate(&self, path: &Path) -> Result<(), String> {
        if self.api_base_url.trim().is_empty() {
            return Err(format!(
                "no API URL configured\n\
                 Set {API_URL_VAR}, or create {} with at minimum:\n\n\
                 api-base-url = \"https://example.com/api\"",
                path.display()
            ));
        }
        if self.timeout_secs == 0 {
            return Err(format!("timeout-secs must be positive in {}", path.display()));
        }
        Ok(())
    }
}
