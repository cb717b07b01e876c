use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::PreloaderError;
use crate::settings::{DEFAULT_LABEL, LABEL_FONT_SIZE};

#[derive(Debug, Deserialize, PartialEq)]
pub struct PreloaderConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub label: LabelConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Initial logical size of the window.
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LabelConfig {
    #[serde(default = "default_text")]
    pub text: String,
    /// TTF/OTF file for the label. System fonts are tried when unset.
    pub font_path: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_title() -> String {
    "Loading".into()
}

fn default_width() -> f64 {
    1280.0
}

fn default_height() -> f64 {
    800.0
}

fn default_text() -> String {
    DEFAULT_LABEL.into()
}

fn default_font_size() -> f32 {
    LABEL_FONT_SIZE
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            text: default_text(),
            font_path: None,
            font_size: default_font_size(),
        }
    }
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            label: LabelConfig::default(),
        }
    }
}

/// Read and parse a single config file.
pub fn load_from(path: &Path) -> Result<PreloaderConfig, PreloaderError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load the preloader config file.
/// Search order:
///   1. PRELOADER_CONFIG env var
///   2. ~/.preloader/config.toml
///   3. Default values
pub fn load() -> PreloaderConfig {
    let candidates = [
        std::env::var("PRELOADER_CONFIG").ok().map(PathBuf::from),
        dirs::home_dir().map(|h| h.join(".preloader/config.toml")),
    ];

    for candidate in candidates.into_iter().flatten() {
        if !candidate.exists() {
            continue;
        }
        match load_from(&candidate) {
            Ok(config) => {
                info!(path = %candidate.display(), label = %config.label.text, "loaded preloader config");
                return config;
            }
            Err(e) => {
                warn!(path = %candidate.display(), error = %e, "failed to load config");
            }
        }
    }

    info!("no config file found, using defaults");
    PreloaderConfig::default()
}
