//! Rendering configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dumbxml/dumbxml.toml`
//! 3. Local config: a TOML file passed by the caller
//! 4. Environment variables: `DUMBXML_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::{XmlError, XmlResult};

/// Settings that shape rendered output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Indentation unit repeated once per depth level (default: four spaces)
    pub indent: String,
    /// Line terminator (default: `\n`)
    pub newline: String,
    /// Emit an indented blank line after the opening tag of an element with children
    pub empty_text_line: bool,
    /// Escape `& < > "` in text and attribute values (default: off)
    pub escape: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent: "    ".into(),
            newline: "\n".into(),
            empty_text_line: true,
            escape: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub indent: Option<String>,
    pub newline: Option<String>,
    pub empty_text_line: Option<bool>,
    pub escape: Option<bool>,
}

/// Get the XDG config directory for dumbxml.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dumbxml").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dumbxml.toml"))
}

fn config_err(e: impl std::fmt::Display) -> XmlError {
    XmlError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> XmlResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| XmlError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| XmlError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            indent: overlay
                .indent
                .clone()
                .unwrap_or_else(|| self.indent.clone()),
            newline: overlay
                .newline
                .clone()
                .unwrap_or_else(|| self.newline.clone()),
            empty_text_line: overlay.empty_text_line.unwrap_or(self.empty_text_line),
            escape: overlay.escape.unwrap_or(self.escape),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional TOML file applied on top of the global config
    ///
    /// A missing global or local file is skipped; an unreadable or
    /// malformed one is an error.
    pub fn load(local: Option<&Path>) -> XmlResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(local_path) = local {
            if local_path.exists() {
                let raw = load_raw_settings(local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply DUMBXML_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> XmlResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("DUMBXML").prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("indent") {
            settings.indent = val;
        }
        if let Ok(val) = config.get_string("newline") {
            settings.newline = val;
        }
        if let Ok(val) = config.get_bool("empty_text_line") {
            settings.empty_text_line = val;
        }
        if let Ok(val) = config.get_bool("escape") {
            settings.escape = val;
        }

        Ok(settings)
    }

    /// Parse settings from TOML; unspecified keys keep their defaults.
    pub fn from_toml_str(content: &str) -> XmlResult<Self> {
        let raw: RawSettings = toml::from_str(content).map_err(config_err)?;
        Ok(Self::default().merge_with(&raw))
    }

    /// Serialize settings to TOML format.
    pub fn to_toml(&self) -> XmlResult<String> {
        toml::to_string_pretty(self).map_err(config_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_with_keeps_unspecified_values() {
        let overlay = RawSettings {
            escape: Some(true),
            ..Default::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert!(merged.escape);
        assert_eq!(merged.indent, "    ");
        assert!(merged.empty_text_line);
    }
}
