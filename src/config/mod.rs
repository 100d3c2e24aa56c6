//! Application configuration.
//!
//! Loaded from a TOML file; every field has a default so an empty or
//! missing file yields a working setup.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classify::{
    Classifier, ClassifyError, DEFAULT_PASS_EXPLOSIVE_YARDS, DEFAULT_RUN_EXPLOSIVE_YARDS,
    DEFAULT_RUN_PATTERNS,
};
use crate::storage::StoreBackend;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub store: StoreSection,
    pub server: ServerSection,
    pub classify: ClassifySection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            store: StoreSection::default(),
            server: ServerSection::default(),
            classify: ClassifySection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Csv,
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Tunables for the success / explosive classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifySection {
    /// Play type substrings treated as run-like (case-insensitive).
    pub run_like_patterns: Vec<String>,
    /// Gain at or above which a run-like play counts as explosive.
    pub run_explosive_yards: f64,
    /// Gain at or above which a pass-like play counts as explosive.
    pub pass_explosive_yards: f64,
}

impl Default for ClassifySection {
    fn default() -> Self {
        Self {
            run_like_patterns: DEFAULT_RUN_PATTERNS.iter().map(|s| s.to_string()).collect(),
            run_explosive_yards: DEFAULT_RUN_EXPLOSIVE_YARDS,
            pass_explosive_yards: DEFAULT_PASS_EXPLOSIVE_YARDS,
        }
    }
}

impl ClassifySection {
    pub fn build_classifier(&self) -> Result<Classifier, ClassifyError> {
        Classifier::new(
            &self.run_like_patterns,
            self.run_explosive_yards,
            self.pass_explosive_yards,
        )
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl AppConfig {
    /// Load from a TOML file. A missing file is not an error; the defaults
    /// apply so a fresh checkout runs without any setup.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.classify.run_like_patterns.is_empty() {
            return Err(ConfigError::Invalid(
                "classify.run_like_patterns must not be empty".into(),
            ));
        }
        if self.classify.run_explosive_yards <= 0.0 || self.classify.pass_explosive_yards <= 0.0 {
            return Err(ConfigError::Invalid(
                "explosive thresholds must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.store.backend, StoreBackend::Csv);
        assert_eq!(config.store.data_dir, PathBuf::from("./data"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.classify.run_like_patterns, vec!["run", "rpo"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();
        writeln!(file, "[store]").unwrap();
        writeln!(file, "backend = \"jsonl\"").unwrap();
        writeln!(file, "[classify]").unwrap();
        writeln!(file, "run_explosive_yards = 12.0").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.store.backend, StoreBackend::Jsonl);
        assert_eq!(config.classify.run_explosive_yards, 12.0);
        // Untouched sections keep their defaults.
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.classify.pass_explosive_yards, 15.0);
    }

    #[test]
    fn test_rejects_zero_port() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_empty_run_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[classify]\nrun_like_patterns = []\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_level = [broken").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_classifier_from_section() {
        let section = ClassifySection::default();
        let classifier = section.build_classifier().unwrap();
        assert!(classifier.is_run_like("RPO Bubble"));
        assert!(!classifier.is_run_like("Play Action"));
    }
}
