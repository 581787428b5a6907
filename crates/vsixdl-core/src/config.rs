use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::HttpOptions;

/// Marketplace host serving the `items?itemName=` pages.
pub const DEFAULT_MARKETPLACE_URL: &str = "https://marketplace.visualstudio.com";

/// Editor CLIs tried for `--install-extension`, in priority order.
pub const DEFAULT_EDITORS: [&str; 3] = ["code", "codium", "vscodium"];

/// `User-Agent` sent with every request.
pub fn default_user_agent() -> String {
    concat!("vsixdl/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_marketplace_url() -> String {
    DEFAULT_MARKETPLACE_URL.to_string()
}

fn default_editors() -> Vec<String> {
    DEFAULT_EDITORS.iter().map(|s| s.to_string()).collect()
}

/// Global configuration loaded from `~/.config/vsixdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VsixdlConfig {
    /// Base URL of the marketplace (no trailing slash needed).
    #[serde(default = "default_marketplace_url")]
    pub marketplace_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Candidate editor commands, first match on PATH wins.
    #[serde(default = "default_editors")]
    pub editors: Vec<String>,
    /// Connect timeout in seconds. Unset leaves libcurl's default in place.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for VsixdlConfig {
    fn default() -> Self {
        Self {
            marketplace_url: default_marketplace_url(),
            user_agent: default_user_agent(),
            editors: default_editors(),
            connect_timeout_secs: None,
        }
    }
}

impl VsixdlConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            user_agent: self.user_agent.clone(),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vsixdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<VsixdlConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<VsixdlConfig> {
    if !path.exists() {
        let default_cfg = VsixdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: VsixdlConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
