//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use termsguard_engine::EngineConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Scoring engine configuration
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Look up uncommon words in the built-in legal glossary
    #[serde(default = "default_true")]
    pub glossary: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".termsguard").join("config.toml"))
    }

    /// Load configuration from an explicit path, or from the default path.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// default configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.engine.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            glossary: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert!(config.settings.glossary);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_load_settings_only() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\ncolor = false\nformat = \"json\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.settings.color);
        assert!(config.settings.glossary);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.engine.chunk_size, EngineConfig::default().chunk_size);
    }

    #[test]
    fn test_load_engine_section() {
        let mut engine = EngineConfig::strict();
        engine.chunk_size = 750;
        let config = Config {
            settings: Settings::default(),
            engine,
        };

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();

        let loaded = Config::load(Some(file.path())).unwrap();
        assert_eq!(loaded.engine.chunk_size, 750);
        assert_eq!(loaded.engine.grading.a, 90.0);
    }

    #[test]
    fn test_invalid_engine_section_rejected() {
        let mut config = Config::default();
        config.engine.chunk_size = 0;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(config.to_toml().unwrap().as_bytes()).unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[settings\ncolor = ").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
