//! Configuration for DovetailKit
//!
//! A config file holds two sections:
//! - `joint`: default joint parameters, overridden by command-line flags
//! - `layout`: buffer factors, text sizing and board separation
//!
//! Both sections are optional; missing keys fall back to the built-in
//! defaults.

use crate::error::{SettingsError, SettingsResult};
use dovetailkit_camtools::{JointParameters, LayoutSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_DIR_NAME: &str = "dovetailkit";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(SettingsError::InvalidSetting {
                key: "path".to_string(),
                reason: format!(
                    "config file must be .json or .toml, got {}",
                    path.display()
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default joint parameters
    pub joint: JointParameters,
    /// Layout tunables
    pub layout: LayoutSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Load `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration
    ///
    /// Joint parameters are only checked against their basic domain; whether
    /// the joint can actually be cut is decided when it is resolved.
    pub fn validate(&self) -> SettingsResult<()> {
        self.joint
            .validate()
            .map_err(|e| SettingsError::InvalidSetting {
                key: "joint".to_string(),
                reason: e.to_string(),
            })?;

        self.layout
            .validate()
            .map_err(|e| SettingsError::InvalidSetting {
                key: "layout".to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

/// `<platform config dir>/dovetailkit/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_invalid_joint_is_rejected() {
        let mut config = Config::new();
        config.joint.cut_angle = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "joint"
        ));
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let mut config = Config::new();
        config.layout.font_size = -1.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "layout"
        ));
    }

    #[test]
    fn test_unknown_extension() {
        assert!(ConfigFormat::from_path(Path::new("config.yaml")).is_err());
        assert_eq!(
            ConfigFormat::from_path(Path::new("a/b.toml")).unwrap(),
            ConfigFormat::Toml
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [joint]
            num_tails = 3
            width = 200.0

            [layout]
            board_separation = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.joint.num_tails, 3);
        assert_eq!(config.joint.board_width, 200.0);
        assert_eq!(config.joint.cut_angle, 15.0);
        assert_eq!(config.layout.board_separation, 30.0);
        assert_eq!(config.layout.overcut_buffer_factor, 0.55);
    }
}
