//! Optional TOML configuration.
//!
//! Both tools run with built-in defaults; a file passed via `--config` only
//! overrides the lock heuristic and the tap pauses. Every section and field
//! is optional, and unknown keys are rejected so typos do not silently fall
//! back to defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::lock::LockPolicy;
use crate::tap::TapTiming;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ---------------------------------------------------------------------------
// File schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub lock: LockSection,
    pub tap: TapSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LockSection {
    /// Owner name of the lock/login overlay window.
    pub owner: String,
    /// Overlay windows sit strictly above this layer.
    pub min_layer: i64,
}

impl Default for LockSection {
    fn default() -> Self {
        let policy = LockPolicy::default();
        Self {
            owner: policy.owner,
            min_layer: policy.min_layer,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TapSection {
    pub hover_settle_ms: u64,
    pub press_hold_ms: u64,
}

impl Default for TapSection {
    fn default() -> Self {
        let timing = TapTiming::default();
        Self {
            hover_settle_ms: timing.hover_settle.as_millis() as u64,
            press_hold_ms: timing.press_hold.as_millis() as u64,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("config: loaded {}", path.display());
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn lock_policy(&self) -> LockPolicy {
        LockPolicy {
            owner: self.lock.owner.clone(),
            min_layer: self.lock.min_layer,
        }
    }

    pub fn tap_timing(&self) -> TapTiming {
        TapTiming {
            hover_settle: Duration::from_millis(self.tap.hover_settle_ms),
            press_hold: Duration::from_millis(self.tap.press_hold_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_built_in_policy_and_timing() {
        let config = Config::default();
        assert_eq!(config.lock_policy(), LockPolicy::default());
        assert_eq!(config.tap_timing(), TapTiming::default());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.lock.owner, "loginwindow");
        assert_eq!(config.lock.min_layer, 2000);
        assert_eq!(config.tap.hover_settle_ms, 100);
        assert_eq!(config.tap.press_hold_ms, 50);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[tap]\npress_hold_ms = 80\n").unwrap();
        assert_eq!(config.tap.press_hold_ms, 80);
        assert_eq!(config.tap.hover_settle_ms, 100);
        assert_eq!(config.lock_policy(), LockPolicy::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[lock]\nthreshold = 10\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lock]\nowner = \"ScreenSaverEngine\"\nmin_layer = 1000").unwrap();

        let config = Config::load(file.path()).unwrap();
        let policy = config.lock_policy();
        assert_eq!(policy.owner, "ScreenSaverEngine");
        assert_eq!(policy.min_layer, 1000);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = Config::load(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn load_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tap]\nhover_settle_ms = \"slow\"").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_or_default_without_path_is_default() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.tap_timing(), TapTiming::default());
    }
}
