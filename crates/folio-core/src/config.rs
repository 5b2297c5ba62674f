use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default IIIF endpoint (Gallica, Bibliothèque nationale de France).
pub const DEFAULT_MANIFEST_BASE_URL: &str = "https://gallica.bnf.fr/iiif";

/// What to do when the manifest request returns a non-success status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFailurePolicy {
    /// Log a warning and continue with empty location and metadata lists.
    #[default]
    Degrade,
    /// Abort the run with an error.
    Fail,
}

/// Global configuration loaded from `~/.config/folio/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Base URL of the IIIF service; `<base>/<identifier>/manifest.json` is requested.
    pub manifest_base_url: String,
    /// Optional fixed pause between two image requests, in milliseconds (None = disabled).
    #[serde(default)]
    pub request_delay_ms: Option<u64>,
    /// Optional transport timeout per request, in seconds (None = wait forever).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Optional User-Agent header sent with every request.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Behaviour on a non-success manifest response: "degrade" (default) or "fail".
    #[serde(default)]
    pub on_manifest_failure: ManifestFailurePolicy,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            manifest_base_url: DEFAULT_MANIFEST_BASE_URL.to_string(),
            request_delay_ms: None,
            request_timeout_secs: None,
            user_agent: None,
            on_manifest_failure: ManifestFailurePolicy::Degrade,
        }
    }
}

impl FolioConfig {
    /// Inter-request delay, if enabled. A zero delay counts as disabled.
    pub fn request_delay(&self) -> Option<Duration> {
        self.request_delay_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("folio")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FolioConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FolioConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<FolioConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: FolioConfig = toml::from_str(&data)
        .with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
