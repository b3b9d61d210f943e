use std::path::{Path, PathBuf};

use barsmith_services::RenderSettings;

pub const DEFAULT_PREFIX: &str = "bar";
pub const DEFAULT_BARS: usize = 4;

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Bars are written to `{prefix}_{i}.wav`
    pub prefix: PathBuf,
    pub bars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: PathBuf::from(DEFAULT_PREFIX),
            bars: DEFAULT_BARS,
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("barsmith")
        .join("config.toml")
}

/// Load `path`, falling back to defaults when the file is missing or malformed
pub fn load_config(path: &Path) -> AppConfig {
    let Ok(text) = std::fs::read_to_string(path) else {
        tracing::debug!("No config at {}, using defaults", path.display());
        return AppConfig::default();
    };
    match toml::from_str(&text) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
            AppConfig::default()
        }
    }
}
