//! Verifier configuration
//!
//! Loaded from a JSON file (explicit `--config`, else the per-user config
//! directory) and then overridden by command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::algorithm::{DEFAULT_PARAMS, Params};

/// Default tracing filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Verifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Equihash N used when a command or job does not name one
    pub n: u32,
    /// Equihash K used when a command or job does not name one
    pub k: u32,
    /// Batch worker threads (default: number of CPU cores)
    pub threads: Option<usize>,
    /// tracing-subscriber filter directive
    pub log_filter: String,
    /// Emit JSON instead of text
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n: DEFAULT_PARAMS.n(),
            k: DEFAULT_PARAMS.k(),
            threads: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub n: Option<u32>,
    pub k: Option<u32>,
    pub threads: Option<usize>,
    pub log_filter: Option<String>,
    pub json: bool,
}

impl Config {
    /// Parse a config file; the parameter pair must be in the table.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.params()?;
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else `fallback` if it exists,
    /// else defaults.
    pub fn load_or_default(explicit: Option<&Path>, fallback: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match fallback {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(n) = overrides.n {
            self.n = n;
        }
        if let Some(k) = overrides.k {
            self.k = k;
        }
        if overrides.threads.is_some() {
            self.threads = overrides.threads;
        }
        if let Some(filter) = overrides.log_filter {
            self.log_filter = filter;
        }
        self.json |= overrides.json;
        self
    }

    /// The configured parameter pair, looked up in the table
    pub fn params(&self) -> Result<Params> {
        Params::lookup(self.n, self.k).context("invalid config")
    }
}

/// `<config dir>/ehverify/config.json`
#[cfg(feature = "cli")]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ehverify").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!((config.n, config.k), (150, 5));
        assert_eq!(config.log_filter, "warn");
        assert!(config.params().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"n": 48, "k": 5, "threads": 2}}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!((config.n, config.k), (48, 5));
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(!config.json);
    }

    #[test]
    fn test_unsupported_params_in_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"n": 144, "k": 5}}"#).unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(Config::load_or_default(Some(&missing), None).is_err());
        assert_eq!(
            Config::load_or_default(None, Some(missing)).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().with_overrides(Overrides {
            n: Some(200),
            k: Some(9),
            threads: Some(4),
            log_filter: Some("debug".to_string()),
            json: true,
        });
        assert_eq!((config.n, config.k), (200, 9));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.log_filter, "debug");
        assert!(config.json);

        let untouched = Config::default().with_overrides(Overrides::default());
        assert_eq!(untouched, Config::default());
    }
}
