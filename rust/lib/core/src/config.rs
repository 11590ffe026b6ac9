use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::AdminError;

/// Client configuration for the admin dashboard core.
///
/// Loaded from `~/.bnpl/config.toml`, then overridden by environment
/// variables and finally by `--key=value` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// REST API base URL (e.g. "https://api.example.uz/v1").
    pub api_base_url: String,

    /// Tenant identifier sent as `X-Tenant-Id` on every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,

    /// UI locale used for navigation labels and messages.
    pub locale: String,

    /// Quiet period for debounced fetches, in milliseconds.
    pub debounce_ms: u64,

    /// Per-request timeout, in seconds.
    pub request_timeout_secs: u64,

    /// Route used when no other route is reachable.
    pub login_path: String,

    /// Bearer token from the last login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            tenant: None,
            locale: "en".to_string(),
            debounce_ms: 700,
            request_timeout_secs: 30,
            login_path: "/login".to_string(),
            token: None,
        }
    }
}

impl AdminConfig {
    /// Default config file path: ~/.bnpl/config.toml.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".bnpl").join("config.toml")
    }

    /// Load config from disk, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AdminError> {
        if !path.exists() {
            tracing::debug!("config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| AdminError::Config(format!("read {}: {}", path.display(), e)))?;
        let config: AdminConfig = toml::from_str(&content)
            .map_err(|e| AdminError::Config(format!("parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to disk, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<(), AdminError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AdminError::Config(format!("create {}: {}", parent.display(), e)))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AdminError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| AdminError::Config(format!("write {}: {}", path.display(), e)))
    }

    /// Apply `BNPL_API_URL`, `BNPL_TENANT` and `BNPL_TOKEN` if set.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("BNPL_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(tenant) = std::env::var("BNPL_TENANT") {
            self.tenant = Some(tenant);
        }
        if let Ok(token) = std::env::var("BNPL_TOKEN") {
            self.token = Some(token);
        }
        self
    }

    /// Apply command-line overrides.
    ///
    /// Supported flags:
    /// - `--api=URL`
    /// - `--tenant=ID`
    /// - `--locale=CODE`
    /// - `--debounce-ms=N`
    /// - `--timeout=SECS`
    ///
    /// Unknown flags are ignored; malformed numbers are an error.
    pub fn with_args(mut self, args: &[String]) -> Result<Self, AdminError> {
        for arg in args {
            if let Some(val) = arg.strip_prefix("--api=") {
                self.api_base_url = val.to_string();
            } else if let Some(val) = arg.strip_prefix("--tenant=") {
                self.tenant = Some(val.to_string());
            } else if let Some(val) = arg.strip_prefix("--locale=") {
                self.locale = val.to_string();
            } else if let Some(val) = arg.strip_prefix("--debounce-ms=") {
                self.debounce_ms = parse_number("debounce-ms", val)?;
            } else if let Some(val) = arg.strip_prefix("--timeout=") {
                self.request_timeout_secs = parse_number("timeout", val)?;
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Parse configuration from command-line arguments on top of defaults.
    pub fn from_args(args: &[String]) -> Result<Self, AdminError> {
        Self::default().with_args(args)
    }

    /// Debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<(), AdminError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(AdminError::Config(format!(
                "api_base_url must be http(s): '{}'",
                self.api_base_url
            )));
        }
        if !self.login_path.starts_with('/') {
            return Err(AdminError::Config(format!(
                "login_path must start with '/': '{}'",
                self.login_path
            )));
        }
        Ok(())
    }
}

fn parse_number(flag: &str, val: &str) -> Result<u64, AdminError> {
    val.parse()
        .map_err(|_| AdminError::Config(format!("--{} expects a number, got '{}'", flag, val)))
}
