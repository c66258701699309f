#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Generator configuration
//!
//! This crate provides configuration management for the binding generator.
//! It handles loading, saving, and managing configuration files that specify:
//! - Which namespace to generate and where its metadata lives
//! - Template, blacklist and header locations
//! - Logging configuration
//! - Output placement
//!
//! Configuration is stored in TOML format. Command-line flags override any
//! value read from a file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What to generate and from which inputs
    pub generator: GeneratorConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Where generated bindings are written
    pub output: OutputConfig,
}

/// Default bound on parent-chain walks, shared with the definition builders.
pub use codegen::context::DEFAULT_MAX_ANCESTOR_DEPTH;

/// Generation inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Namespace to generate (e.g. "Gtk")
    pub namespace: Option<String>,
    /// Typelib JSON documents to load, including dependencies of the namespace
    pub typelibs: Vec<PathBuf>,
    /// Directory of snippet templates; the built-in Go snippets when unset
    pub templates_dir: Option<PathBuf>,
    /// Directory holding per-namespace blacklist files
    pub blacklist_dir: Option<PathBuf>,
    /// Directory holding per-namespace header files
    pub header_dir: Option<PathBuf>,
    /// Upper bound on ancestor walks, guarding against cyclic metadata
    pub max_ancestor_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            typelibs: Vec::new(),
            templates_dir: None,
            blacklist_dir: None,
            header_dir: None,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string() } }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write generated bindings
    pub output_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self { Self { output_dir: Config::default_output_dir() } }
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/gigen/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("gigen");
        Ok(config_dir.join("config.toml"))
    }

    /// Load the file at the default path when it exists, else the defaults
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Get the default output directory for generated bindings
    pub fn default_output_dir() -> PathBuf {
        Self::default_output_dir_internal(std::env::current_dir().ok())
    }

    /// Internal function for testing - allows injection of environment values
    fn default_output_dir_internal(current_dir: Option<PathBuf>) -> PathBuf {
        current_dir.unwrap_or_else(|| PathBuf::from(".")).join("generated")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_from_file() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        let toml_content = r#"
            [generator]
            namespace = "Gtk"
            typelibs = ["typelibs/GObject.json", "typelibs/Gtk.json"]
            templates_dir = "snippets"
            blacklist_dir = "blacklist"
            max_ancestor_depth = 16

            [logging]
            level = "debug"

            [output]
            output_dir = "out/gi"
        "#;
        fs::write(&temp_file, toml_content)
            .expect("Failed to write TOML content to temporary file");

        let loaded = Config::from_file(&temp_file).expect("Failed to load config");
        assert_eq!(loaded.generator.namespace.as_deref(), Some("Gtk"));
        assert_eq!(loaded.generator.typelibs.len(), 2);
        assert_eq!(loaded.generator.templates_dir, Some(PathBuf::from("snippets")));
        assert_eq!(loaded.generator.blacklist_dir, Some(PathBuf::from("blacklist")));
        assert_eq!(loaded.generator.header_dir, None);
        assert_eq!(loaded.generator.max_ancestor_depth, 16);
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.output.output_dir, PathBuf::from("out/gi"));

        // Sections and keys may be omitted
        let partial = NamedTempFile::new().expect("Failed to create temporary file");
        fs::write(&partial, "[generator]\nnamespace = \"GLib\"\n")
            .expect("Failed to write partial TOML");
        let loaded = Config::from_file(&partial).expect("Failed to load partial config");
        assert_eq!(loaded.generator.namespace.as_deref(), Some("GLib"));
        assert_eq!(loaded.generator.max_ancestor_depth, DEFAULT_MAX_ANCESTOR_DEPTH);
        assert_eq!(loaded.logging.level, "info");

        // Test file not found error
        let result = Config::from_file("nonexistent_file.toml");
        match result.expect_err("Expected error for nonexistent file") {
            ConfigError::FileRead(_) => {}
            other => panic!("Expected FileRead error, got {:?}", other),
        }

        // Test parse error
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        fs::write(&temp_file, "invalid toml content").expect("Failed to write invalid TOML");
        match Config::from_file(&temp_file).expect_err("Expected parse error") {
            ConfigError::Parse(_) => {}
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_save() {
        let mut config = Config::default();
        config.generator.namespace = Some("Gio".to_string());
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");

        config.save(&temp_file).expect("Failed to save config");
        let contents = fs::read_to_string(&temp_file).expect("Failed to read saved config file");
        assert!(contents.contains("Gio"));
        assert!(contents.contains("max_ancestor_depth"));
        let reloaded = Config::from_file(&temp_file).expect("Failed to reload saved config");
        assert_eq!(reloaded, config);

        // Test file write error - try to save to a non-existent directory
        let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let missing = temp_dir.path().join("nonexistent").join("config.toml");
        match config.save(&missing).expect_err("Expected file write error") {
            ConfigError::FileRead(_) => (),
            other => panic!("Expected FileRead error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path().expect("Failed to get default config path");
        let path_str = path.to_str().expect("Path should be valid UTF-8");
        assert!(path_str.contains("gigen"));
        assert!(path_str.ends_with("config.toml"));
    }

    #[test]
    fn test_default_output_dir_internal() {
        let dir = Config::default_output_dir_internal(Some(PathBuf::from("/tmp/current")));
        assert_eq!(dir, PathBuf::from("/tmp/current/generated"));

        let dir = Config::default_output_dir_internal(None);
        assert_eq!(dir, PathBuf::from("./generated"));
    }

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.generator.namespace, None);
        assert!(config.generator.typelibs.is_empty());
        assert_eq!(config.generator.max_ancestor_depth, DEFAULT_MAX_ANCESTOR_DEPTH);
        assert_eq!(config.logging.level, "info");
        assert!(config.output.output_dir.ends_with("generated"));
    }

    #[test]
    fn test_default_depth_matches_builders() {
        let ctx = codegen::GenerationContext::new();
        assert_eq!(GeneratorConfig::default().max_ancestor_depth, ctx.max_ancestor_depth());
    }
}
