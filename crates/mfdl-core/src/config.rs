use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::speedtest::DEFAULT_SPEED_TEST_URL;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Speed test settings (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedTestConfig {
    /// Run the speed test on every invocation, not only with `--speed-test`.
    #[serde(default)]
    pub enabled: bool,
    /// File fetched to measure throughput.
    #[serde(default = "default_speed_test_url")]
    pub url: String,
}

impl Default for SpeedTestConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_speed_test_url(),
        }
    }
}

fn default_speed_test_url() -> String {
    DEFAULT_SPEED_TEST_URL.to_string()
}

fn default_host_domain() -> String {
    "mediafire.com".to_string()
}

fn default_anchor_id() -> String {
    "downloadButton".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_progress_interval_ms() -> u64 {
    500
}

/// Global configuration loaded from `~/.config/mfdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfdlConfig {
    /// Substring a landing-page URL must contain to be accepted.
    #[serde(default = "default_host_domain")]
    pub host_domain: String,
    /// `id` of the anchor holding the direct link on the landing page.
    #[serde(default = "default_anchor_id")]
    pub download_anchor_id: String,
    /// Sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Minimum time between console progress redraws.
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,
    #[serde(default)]
    pub speed_test: Option<SpeedTestConfig>,
}

impl Default for MfdlConfig {
    fn default() -> Self {
        Self {
            host_domain: default_host_domain(),
            download_anchor_id: default_anchor_id(),
            user_agent: default_user_agent(),
            progress_interval_ms: default_progress_interval_ms(),
            speed_test: None,
        }
    }
}

impl MfdlConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn speed_test_url(&self) -> &str {
        self.speed_test
            .as_ref()
            .map_or(DEFAULT_SPEED_TEST_URL, |s| s.url.as_str())
    }

    pub fn speed_test_enabled(&self) -> bool {
        self.speed_test.as_ref().is_some_and(|s| s.enabled)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mfdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MfdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MfdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MfdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
