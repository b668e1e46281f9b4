//! Configuration model for hasp.
//!
//! This module defines the Config struct that represents `config.yaml` in the
//! state directory. It supports forward-compatible YAML parsing (unknown
//! fields are ignored), sensible defaults for every field, and validation of
//! config values before a scan runs with them.

use crate::error::{HaspError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File name of the account record within the state directory.
    pub record_file: String,

    /// Workspace scanning settings.
    pub scan: ScanConfig,
}

/// Settings that steer workspace layout detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extension (without the dot) that identifies a source file.
    pub source_extension: String,

    /// Glob patterns for workspace entries to skip entirely.
    pub exclude: Vec<String>,

    /// Substring marking tooling-generated entries (e.g. IDE index folders).
    pub metadata_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            record_file: "account.dat".to_string(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_extension: "java".to_string(),
            exclude: Vec::new(),
            metadata_marker: "metadata".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Missing fields fall back to defaults; unknown fields are ignored so
    /// newer config files keep working with older binaries.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HaspError::Io(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            HaspError::UserError(format!(
                "failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Atomically save the configuration to a YAML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| HaspError::UserError(format!("failed to serialize config: {}", e)))?;
        crate::fs::atomic_write_file(path, &yaml)
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<()> {
        if self.record_file.is_empty() {
            return Err(HaspError::UserError(
                "config: record_file must not be empty".to_string(),
            ));
        }
        if self.record_file.contains(std::path::MAIN_SEPARATOR) {
            return Err(HaspError::UserError(format!(
                "config: record_file '{}' must be a bare file name",
                self.record_file
            )));
        }
        self.scan.validate()
    }
}

impl ScanConfig {
    /// Validate scan settings.
    pub fn validate(&self) -> Result<()> {
        if self.source_extension.is_empty() {
            return Err(HaspError::UserError(
                "config: scan.source_extension must not be empty".to_string(),
            ));
        }
        if self.source_extension.starts_with('.') {
            return Err(HaspError::UserError(format!(
                "config: scan.source_extension '{}' must not include the leading dot",
                self.source_extension
            )));
        }
        // Compile the globs once here so a bad pattern fails before any scan.
        self.exclude_set()?;
        Ok(())
    }

    /// Compile the exclude patterns into a matcher.
    pub fn exclude_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| {
                HaspError::UserError(format!(
                    "config: invalid exclude pattern '{}': {}",
                    pattern, e
                ))
            })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| HaspError::UserError(format!("config: failed to build exclude set: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.record_file, "account.dat");
        assert_eq!(config.scan.source_extension, "java");
        assert!(config.scan.exclude.is_empty());
        assert_eq!(config.scan.metadata_marker, "metadata");
    }

    #[test]
    fn load_applies_defaults_for_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "scan:\n  source_extension: rs\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.scan.source_extension, "rs");
        assert_eq!(config.record_file, "account.dat");
        assert_eq!(config.scan.metadata_marker, "metadata");
    }

    #[test]
    fn load_ignores_unknown_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "record_file: info.dat\nfuture_option: true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.record_file, "info.dat");
    }

    #[test]
    fn load_rejects_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load(temp_dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(HaspError::Io(_))));
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.scan.exclude = vec!["Archive*".to_string()];
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn validate_rejects_empty_extension() {
        let mut config = Config::default();
        config.scan.source_extension = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_dotted_extension() {
        let mut config = Config::default();
        config.scan.source_extension = ".java".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_record_file_with_separator() {
        let mut config = Config::default();
        config.record_file = "state/account.dat".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_exclude_pattern() {
        let mut config = Config::default();
        config.scan.exclude = vec!["[".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn exclude_set_matches_configured_patterns() {
        let scan = ScanConfig {
            exclude: vec!["Archive*".to_string(), "scratch".to_string()],
            ..ScanConfig::default()
        };
        let set = scan.exclude_set().unwrap();

        assert!(set.is_match("Archive (old)"));
        assert!(set.is_match("scratch"));
        assert!(!set.is_match("app"));
    }
}
