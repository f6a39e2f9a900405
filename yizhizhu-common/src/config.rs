//! Settings Service
//!
//! Stores the text-generation endpoint (base URL, model, API key) and the
//! colour theme in a JSON file. The service is created once at startup and
//! handed to the views that need it; nothing here is global.
//!
//! File layout:
//!
//! ```json
//! {
//!   "API": { "BaseUrl": "...", "ApiKey": "...", "ModelName": "..." },
//!   "Appearance": { "ThemeMode": "Light" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://apis.iflow.cn/v1";
pub const DEFAULT_MODEL_NAME: &str = "qwen-max";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("base URL must start with http:// or https://, got `{0}`")]
    InvalidBaseUrl(String),
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Follow the desktop setting
    Auto,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Auto];

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::Auto => "Follow system",
        }
    }

    pub fn index(self) -> u32 {
        match self {
            ThemeMode::Light => 0,
            ThemeMode::Dark => 1,
            ThemeMode::Auto => 2,
        }
    }

    pub fn from_index(index: u32) -> Self {
        match index {
            0 => ThemeMode::Light,
            1 => ThemeMode::Dark,
            _ => ThemeMode::Auto,
        }
    }
}

/// Text-generation endpoint settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model_name")]
    pub model_name: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            model_name: default_model_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct AppearanceSettings {
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

/// Everything persisted in the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(rename = "API", default)]
    pub api: ApiSettings,

    /// Older files keep the theme under "QFluentWidgets"
    #[serde(rename = "Appearance", alias = "QFluentWidgets", default)]
    pub appearance: AppearanceSettings,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check values before they are saved
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.to_string()));
        }
        Ok(())
    }
}

/// Owns the settings and the file they live in
#[derive(Debug)]
pub struct SettingsService {
    path: PathBuf,
    settings: Settings,
}

impl SettingsService {
    /// Load settings from `path`, creating the file with defaults if absent.
    ///
    /// A file that cannot be read or parsed is replaced by defaults in memory
    /// only; it is overwritten on the next save.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        if !path.exists() {
            tracing::info!("Creating default settings at {}", path.display());
            let service = Self {
                path,
                settings: Settings::default(),
            };
            service.save()?;
            return Ok(service);
        }

        let settings = match std::fs::read_to_string(&path) {
            Ok(contents) => Settings::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                Settings::default()
            }),
            Err(e) => {
                tracing::warn!("Could not read settings file {}: {}", path.display(), e);
                Settings::default()
            }
        };

        Ok(Self { path, settings })
    }

    /// Service that never touched disk, for previews and tests
    pub fn in_memory(path: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_base_url(&mut self, value: &str) {
        self.settings.api.base_url = value.trim().to_string();
    }

    pub fn set_api_key(&mut self, value: &str) {
        self.settings.api.api_key = value.to_string();
    }

    pub fn set_model_name(&mut self, value: &str) {
        self.settings.api.model_name = value.trim().to_string();
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.settings.appearance.theme_mode = theme;
    }

    /// Write the current settings to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = self.settings.to_json()?;
        std::fs::write(&self.path, json).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.api.model_name, DEFAULT_MODEL_NAME);
        assert!(settings.api.api_key.is_empty());
        assert_eq!(settings.appearance.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn test_parse_partial_file() {
        let json = r#"{ "API": { "ApiKey": "sk-test" } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.api.api_key, "sk-test");
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.appearance.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn test_reads_theme_from_legacy_section() {
        let json = r#"{ "QFluentWidgets": { "ThemeMode": "Dark" } }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.appearance.theme_mode, ThemeMode::Dark);
        // Written back under the current name
        assert!(settings.to_json().unwrap().contains("\"Appearance\""));
    }

    #[test]
    fn test_json_layout() {
        let json = Settings::default().to_json().unwrap();
        assert!(json.contains("\"API\""));
        assert!(json.contains("\"BaseUrl\""));
        assert!(json.contains("\"ModelName\""));
        assert!(json.contains("\"ThemeMode\": \"Light\""));
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("config.json");

        let service = SettingsService::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(service.settings(), &Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut service = SettingsService::load(&path).unwrap();
        service.set_base_url("  https://example.com/v1 ");
        service.set_model_name("my-model");
        service.set_api_key("secret");
        service.set_theme(ThemeMode::Dark);
        service.save().unwrap();

        let reloaded = SettingsService::load(&path).unwrap();
        assert_eq!(reloaded.settings().api.base_url, "https://example.com/v1");
        assert_eq!(reloaded.settings().api.model_name, "my-model");
        assert_eq!(reloaded.settings().api.api_key, "secret");
        assert_eq!(reloaded.settings().appearance.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let service = SettingsService::load(&path).unwrap();
        assert_eq!(service.settings(), &Settings::default());
    }

    #[test]
    fn test_validate_base_url() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        settings.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_theme_index_round_trip() {
        for theme in ThemeMode::ALL {
            assert_eq!(ThemeMode::from_index(theme.index()), theme);
        }
    }
}
