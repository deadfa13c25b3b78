use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "ncp.toml";

/// Where release metadata comes from and where it is cached.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// GitHub repository publishing the firmware releases (`owner/name`).
    pub repo: String,
    /// Base URL of the releases API.
    pub api_base: String,
    /// Cache root, relative to the project directory unless absolute.
    pub cache_dir: PathBuf,
    /// Optional API token (raises rate limits). `GITHUB_TOKEN` is used when unset.
    pub github_token: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            repo: "blynkkk/BlynkNcpDriver".to_string(),
            api_base: "https://api.github.com".to_string(),
            cache_dir: PathBuf::from(".pio/BlynkNCP"),
            github_token: None,
        }
    }
}

// The token never appears in logs.
impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .field("cache_dir", &self.cache_dir)
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl ResolverConfig {
    /// Token from config, falling back to the `GITHUB_TOKEN` environment variable.
    pub fn token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|t| !t.trim().is_empty())
    }
}

/// Options of the upload target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Comma-separated flasher names, run in order.
    pub flasher: String,
    /// Firmware variant; the asset pattern is `BlynkNCP_<firmware>`.
    pub firmware: Option<String>,
    /// Release tag or "latest".
    pub firmware_ver: String,
    /// Serial baud rate passed to esptool.
    pub upload_speed: String,
    /// Module has no auto-reset circuit; changes the reset defaults to `no_reset`.
    pub manual_reset: bool,
    pub erase_all: bool,
    pub use_stub: bool,
    /// esptool `--before`; default depends on `manual_reset`.
    pub before_upload: Option<String>,
    /// esptool `--after`; default depends on `manual_reset`.
    pub after_upload: Option<String>,
    pub pre_upload_message: Option<String>,
    pub post_upload_message: Option<String>,
    /// PlatformIO environment used to build the on-device flasher. `PIOENV` when unset.
    pub pioenv: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            flasher: "BlynkNcpFlasher, esptool".to_string(),
            firmware: None,
            firmware_ver: "latest".to_string(),
            upload_speed: "460800".to_string(),
            manual_reset: false,
            erase_all: true,
            use_stub: true,
            before_upload: None,
            after_upload: None,
            pre_upload_message: None,
            post_upload_message: None,
            pioenv: None,
        }
    }
}

impl UploadConfig {
    pub fn before_upload(&self) -> &str {
        match &self.before_upload {
            Some(v) => v,
            None if self.manual_reset => "no_reset",
            None => "default_reset",
        }
    }

    pub fn after_upload(&self) -> &str {
        match &self.after_upload {
            Some(v) => v,
            None if self.manual_reset => "no_reset",
            None => "hard_reset",
        }
    }

    pub fn pioenv(&self) -> Option<String> {
        self.pioenv
            .clone()
            .or_else(|| std::env::var("PIOENV").ok())
            .filter(|e| !e.is_empty())
    }
}

/// Project configuration loaded from `ncp.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NcpConfig {
    pub resolver: ResolverConfig,
    pub upload: UploadConfig,
}

pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE_NAME)
}

/// Load configuration from `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<NcpConfig> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(NcpConfig::default());
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: NcpConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
