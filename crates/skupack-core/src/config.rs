use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::resolver::DriveEndpoints;
use crate::retry::RetryPolicy;

/// Environment variable that overrides `drive_api_key` from the config file.
pub const DRIVE_API_KEY_ENV: &str = "SKUPACK_DRIVE_API_KEY";

/// Desktop-browser User-Agent sent with every resolver request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Transport-level retry parameters (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per HTTP request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: Duration::from_secs_f64(self.base_delay_secs.max(0.0)),
            max_delay: Duration::from_secs(self.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/skupack/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkupackConfig {
    /// User-Agent header for all resolver requests.
    pub user_agent: String,
    /// Accept header for image downloads.
    pub accept: String,
    /// Accept-Language header for image downloads.
    pub accept_language: String,
    /// Connect timeout per HTTP attempt, in seconds.
    pub connect_timeout_secs: u64,
    /// Total timeout per HTTP attempt, in seconds.
    pub timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirects: u32,
    /// Drive bodies shorter than this are treated as error pages, not images.
    pub min_payload_bytes: usize,
    /// Folder used when a record carries no usable path.
    pub default_root: String,
    /// Drive API key enabling folder links and authenticated downloads.
    pub drive_api_key: Option<String>,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
    /// Optional host overrides (used to point the resolver at a mirror or test server).
    pub endpoints: Option<DriveEndpoints>,
}

impl Default for SkupackConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: "image/*,*/*;q=0.8".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 120,
            max_redirects: 10,
            min_payload_bytes: 1000,
            default_root: crate::catalog::DEFAULT_ROOT.to_string(),
            drive_api_key: None,
            retry: None,
            endpoints: None,
        }
    }
}

impl SkupackConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().policy()
    }

    pub fn endpoints(&self) -> DriveEndpoints {
        self.endpoints.clone().unwrap_or_default()
    }

    /// Apply environment overrides (currently only the Drive API key).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(DRIVE_API_KEY_ENV) {
            let key = key.trim();
            if !key.is_empty() {
                self.drive_api_key = Some(key.to_string());
            }
        }
        self
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("skupack")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SkupackConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SkupackConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg.with_env_overrides());
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SkupackConfig = toml::from_str(&data)?;
    Ok(cfg.with_env_overrides())
}
