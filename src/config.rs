//! Process configuration.
//!
//! All knobs live in one explicit [`Config`] struct, constructed once at
//! startup (file defaults merged with CLI flags) and passed by reference to
//! the collaborators. Nothing reads configuration ambiently.

use crate::render::RenderFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Default model alias passed to the Claude CLI.
pub const DEFAULT_MODEL: &str = "sonnet";

/// Default Kroki-compatible rendering endpoint.
pub const DEFAULT_RENDERER_URL: &str = "https://kroki.io";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Model passed to the Claude CLI (e.g., sonnet, haiku, opus).
    pub model: String,
    /// Alternative backend command; receives the prompt on stdin.
    pub custom_command: Option<String>,
    /// Kroki-compatible rendering endpoint.
    pub renderer_url: String,
    /// Image format for rendering.
    pub render_format: RenderFormat,
    /// Rewrite `flowchart` headers to `graph` for older renderers.
    pub graph_compat: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            custom_command: None,
            renderer_url: DEFAULT_RENDERER_URL.to_owned(),
            render_format: RenderFormat::default(),
            graph_compat: false,
        }
    }
}

/// Path of the user config file, if a config directory exists on this
/// platform.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flowgen").join("config.json"))
}

impl Config {
    /// Load the user config file, falling back to defaults when the file
    /// does not exist. A file that exists but fails to parse is an error,
    /// not a silent fallback.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the config to its default location, creating the directory if
    /// needed. Returns the path written to.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path().ok_or_else(|| {
            ConfigError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "no config directory on this platform",
            ))
        })?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "sonnet");
        assert_eq!(config.renderer_url, "https://kroki.io");
        assert_eq!(config.render_format, RenderFormat::Png);
        assert!(config.custom_command.is_none());
        assert!(!config.graph_compat);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"model": "opus", "rendererUrl": "http://localhost:8000", "renderFormat": "svg"}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "opus");
        assert_eq!(config.renderer_url, "http://localhost:8000");
        assert_eq!(config.render_format, RenderFormat::Svg);
        // Unspecified fields fall back to defaults
        assert!(config.custom_command.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_round_trip_serialization() {
        let config = Config {
            model: "haiku".to_owned(),
            custom_command: Some("my-backend --flag".to_owned()),
            renderer_url: "http://kroki.internal".to_owned(),
            render_format: RenderFormat::Svg,
            graph_compat: true,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.model, "haiku");
        assert_eq!(back.custom_command.as_deref(), Some("my-backend --flag"));
        assert!(back.graph_compat);
    }
}
