pub mod config;
pub mod extract;
pub mod fields;
pub mod input;
pub mod learn;
pub mod licenses;
pub mod output;

use std::path::{Path, PathBuf};

use ocrex_core::models::config::OcrexConfig;
use tracing::debug;

/// Default location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ocrex")
        .join("config.json")
}

/// The configuration file in effect: `-c` when given, else the default path.
pub fn config_path(explicit: Option<&str>) -> PathBuf {
    explicit.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration, falling back to defaults when no file exists.
///
/// An explicit path must exist.
pub fn load_config(explicit: Option<&str>) -> anyhow::Result<OcrexConfig> {
    if let Some(path) = explicit {
        return Ok(OcrexConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading config from {}", path.display());
        Ok(OcrexConfig::from_file(&path)?)
    } else {
        Ok(OcrexConfig::default())
    }
}
