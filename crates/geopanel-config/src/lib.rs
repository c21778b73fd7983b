//! Persistent settings store for the geopanel bridge.
//!
//! The bridge never touches a global settings singleton: a [`Settings`]
//! value is loaded once, handed to the bridge at construction, and flushed
//! back with [`Settings::save`] when the user opts into persisting a
//! change (credentials, download folder).
//!
//! The store is a TOML file under the platform config directory. The
//! `GEOPANEL_CONFIG` environment variable overrides the location for
//! tests and isolated runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or saving the settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine the platform config directory")]
    NoConfigDir,
}

/// User and application configuration for the panel bridge.
///
/// All fields are optional on disk; absent keys fall back to the
/// defaults the accessors document.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Settings {
    #[serde(skip)]
    source: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_url: Option<String>,
    /// Single-byte encoding assumed for archived project files
    /// ("windows-1252" or "latin-1").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

impl Settings {
    /// Default settings file path, honoring the `GEOPANEL_CONFIG`
    /// override when set and non-empty.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        if let Ok(env_path) = std::env::var("GEOPANEL_CONFIG") {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir()
            .ok_or(SettingsError::NoConfigDir)?
            .join(".config");

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;

        Ok(base.join("geopanel").join("geopanel.toml"))
    }

    /// Load settings from the default location, returning defaults when
    /// the file does not exist yet.
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::default_path()?;
        Self::load_from(path)
    }

    /// Load settings from an explicit path. Subsequent [`Settings::save`]
    /// calls write back to the same path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let mut settings = if path.exists() {
            let content = fs::read_to_string(&path)?;
            toml::from_str::<Self>(&content)?
        } else {
            Self::default()
        };
        settings.source = Some(path);
        Ok(settings)
    }

    /// Write the settings back to the path they were loaded from (or the
    /// default location), creating parent directories as needed.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = match &self.source {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// The path this settings value is bound to, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or("")
    }

    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or("")
    }

    pub fn download_folder(&self) -> &str {
        self.download_folder.as_deref().unwrap_or("")
    }

    /// String-keyed read access, mirroring the flat key namespace the
    /// host exposes in its settings UI.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "user" => self.user.clone(),
            "password" => self.password.clone(),
            "download-folder" => self.download_folder.clone(),
            "panel-url" => self.panel_url.clone(),
            "legacy-encoding" => self.legacy_encoding.clone(),
            "fetch-timeout-secs" => self.fetch_timeout_secs.map(|v| v.to_string()),
            "proxy-enabled" => self.proxy_enabled.map(|v| v.to_string()),
            "proxy-host" => self.proxy_host.clone(),
            "proxy-port" => self.proxy_port.map(|v| v.to_string()),
            "debug" => self.debug.map(|v| v.to_string()),
            _ => None,
        }
    }

    /// String-keyed write access. Unknown keys and unparsable values are
    /// ignored.
    pub fn set(&mut self, key: &str, value: String) {
        match key {
            "user" => self.user = Some(value),
            "password" => self.password = Some(value),
            "download-folder" => self.download_folder = Some(value),
            "panel-url" => self.panel_url = Some(value),
            "legacy-encoding" => self.legacy_encoding = Some(value),
            "fetch-timeout-secs" => self.fetch_timeout_secs = value.parse().ok(),
            "proxy-enabled" => self.proxy_enabled = value.parse().ok(),
            "proxy-host" => self.proxy_host = Some(value),
            "proxy-port" => self.proxy_port = value.parse().ok(),
            "debug" => self.debug = value.parse().ok(),
            _ => {}
        }
    }
}
