//! Settings file holding the translation service credential.
//!
//! ```toml
//! [translate]
//! api_key = "..."
//! ```

use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::error::Error;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "project.settings";

pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub translate: TranslateSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateSettings {
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Source language code. The service detects it when absent.
    #[serde(default)]
    pub source_language: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl TranslateSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Read and validate the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read settings file {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), config_message(e))))
    }

    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| Error::Config(e.message().to_string()))?;
        if settings.translate.api_key.trim().is_empty() {
            return Err(Error::Config("`translate.api_key` is empty".to_string()));
        }
        if settings.translate.timeout_secs == 0 {
            return Err(Error::Config("`translate.timeout_secs` must be positive".to_string()));
        }
        Ok(settings)
    }
}

fn config_message(e: Error) -> String {
    match e {
        Error::Config(message) => message,
        other => other.to_string(),
    }
}
