//! # Application Configuration
//!
//! [`AppConfig`] is fixed once the application is constructed: the window
//! title doubles as the Vulkan application name, and the window size never
//! changes because resizing is not supported.
//!
//! ```toml
//! name = "protomatter engine example"
//! width = 800
//! height = 600
//! application_version = { major = 1, minor = 0, patch = 0 }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{Config, ConfigError};

/// Engine name reported to the driver
pub const ENGINE_NAME: &str = "protomatter";

/// Engine version reported to the driver
pub const ENGINE_VERSION: Version = Version::new(1, 0, 0);

/// Vulkan API version the instance targets
pub const TARGET_API_VERSION: Version = Version::new(1, 0, 0);

/// A major.minor.patch version triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Patch version
    pub patch: u32,
}

impl Version {
    /// Create a version triple
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Window and application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window title and Vulkan application name
    pub name: String,
    /// Window width in screen coordinates
    pub width: u32,
    /// Window height in screen coordinates
    pub height: u32,
    /// Application version reported to the driver
    pub application_version: Version,
}

impl AppConfig {
    /// Create a configuration for the given title and size
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            application_version: Version::default(),
        }
    }

    /// Set the application version
    #[must_use]
    pub fn with_version(mut self, major: u32, minor: u32, patch: u32) -> Self {
        self.application_version = Version::new(major, minor, patch);
        self
    }

    /// Set the window size
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check the invariants the windowing library relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Invalid("application name cannot be empty".to_string()));
        }
        if self.name.contains('\0') {
            return Err(ConfigError::Invalid(
                "application name cannot contain NUL bytes".to_string(),
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Metadata passed to instance creation
    pub fn application_info(&self) -> ApplicationInfo {
        ApplicationInfo {
            application_name: self.name.clone(),
            application_version: self.application_version,
            engine_name: ENGINE_NAME.to_string(),
            engine_version: ENGINE_VERSION,
            api_version: TARGET_API_VERSION,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new("protomatter engine example", 800, 600)
    }
}

impl Config for AppConfig {}

/// Application metadata the driver may use to tune its behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    /// Application name
    pub application_name: String,
    /// Application version
    pub application_version: Version,
    /// Engine name
    pub engine_name: String,
    /// Engine version
    pub engine_version: Version,
    /// Targeted Vulkan API version
    pub api_version: Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(file: &str) -> PathBuf {
        std::env::temp_dir().join(format!("protomatter-{}-{file}", std::process::id()))
    }

    #[test]
    fn test_default_matches_example() {
        let config = AppConfig::default();
        assert_eq!(config.name, "protomatter engine example");
        assert_eq!((config.width, config.height), (800, 600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            AppConfig::new("app", 0, 600).validate(),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::new("app", 800, 0).validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_empty_or_nul_name_is_rejected() {
        assert!(AppConfig::new("", 800, 600).validate().is_err());
        assert!(AppConfig::new("a\0b", 800, 600).validate().is_err());
    }

    #[test]
    fn test_application_info_carries_engine_identity() {
        let info = AppConfig::new("demo", 640, 480).with_version(2, 1, 3).application_info();

        assert_eq!(info.application_name, "demo");
        assert_eq!(info.application_version, Version::new(2, 1, 3));
        assert_eq!(info.engine_name, "protomatter");
        assert_eq!(info.engine_version, Version::new(1, 0, 0));
        assert_eq!(info.api_version, Version::new(1, 0, 0));
    }

    #[test]
    fn test_load_partial_toml_fills_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "name = \"from toml\"\nwidth = 1024\n").unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.name, "from toml");
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.application_version, Version::default());
    }

    #[test]
    fn test_save_and_load_ron() {
        let path = temp_path("saved.ron");
        let config = AppConfig::new("from ron", 320, 200).with_version(0, 3, 1);

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let path = temp_path("config.json");
        std::fs::write(&path, "{}").unwrap();

        let result = AppConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
