use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConvError, Result};
use crate::reader::ReportLayout;

/// Defaults applied when the command line leaves them unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_account_type")]
    pub account_type: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_verify_balance")]
    pub verify_balance: bool,
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub layout: ReportLayout,
}

fn default_account_type() -> String {
    "Bank".to_string()
}

fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

fn default_verify_balance() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            account_type: default_account_type(),
            date_format: default_date_format(),
            verify_balance: default_verify_balance(),
            sheet: None,
            layout: ReportLayout::default(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("frontacc-conv")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing file means defaults; an unparsable one is reported and ignored.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let parsed: std::result::Result<Settings, String> = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
    match parsed {
        Ok(settings) => {
            tracing::debug!(path = %path.display(), "loaded settings");
            settings
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
            Settings::default()
        }
    }
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(|e| ConvError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}
