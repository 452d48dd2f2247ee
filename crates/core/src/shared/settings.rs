use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notification::domain::label_translations::Locale;
use crate::shared::constants::{
    DEFAULT_ACQUIRE_TIMEOUT_MS, DEFAULT_COOLDOWN_MS, DEFAULT_DISPLAY_TIMEOUT_MS,
    DEFAULT_INFERENCE_INTERVAL_MS, DEFAULT_SHUTDOWN_GRACE_MS, SETTINGS_DIR_NAME,
    SETTINGS_FILE_NAME,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}

/// Pipeline timing and notification settings.
///
/// Every field has a default, so a settings file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub inference_interval_ms: u64,
    pub cooldown_ms: u64,
    pub acquire_timeout_ms: u64,
    pub display_timeout_ms: u64,
    pub shutdown_grace_ms: u64,
    pub locale: Locale,
    /// UDP `host:port` of the assistant's wake-up listener. Events are only
    /// logged when unset.
    pub notify_addr: Option<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            inference_interval_ms: DEFAULT_INFERENCE_INTERVAL_MS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            acquire_timeout_ms: DEFAULT_ACQUIRE_TIMEOUT_MS,
            display_timeout_ms: DEFAULT_DISPLAY_TIMEOUT_MS,
            shutdown_grace_ms: DEFAULT_SHUTDOWN_GRACE_MS,
            locale: Locale::default(),
            notify_addr: None,
        }
    }
}

impl PipelineSettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: PipelineSettings =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads from `path` when it exists, otherwise returns defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;
        fs::write(path, json).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/emotion-watch/settings.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("inference_interval_ms", self.inference_interval_ms),
            ("cooldown_ms", self.cooldown_ms),
            ("acquire_timeout_ms", self.acquire_timeout_ms),
            ("display_timeout_ms", self.display_timeout_ms),
        ];
        match fields.iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ConfigError::Zero { field: *field }),
            None => Ok(()),
        }
    }

    pub fn inference_interval(&self) -> Duration {
        Duration::from_millis(self.inference_interval_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }

    pub fn display_timeout(&self) -> Duration {
        Duration::from_millis(self.display_timeout_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let s = PipelineSettings::default();
        assert_eq!(s.inference_interval(), Duration::from_millis(1000));
        assert_eq!(s.cooldown(), Duration::from_millis(3000));
        assert_eq!(s.acquire_timeout(), Duration::from_millis(1000));
        assert_eq!(s.locale, Locale::Zh);
        assert!(s.notify_addr.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"cooldown_ms": 5000, "locale": "en"}"#).unwrap();

        let s = PipelineSettings::load(&path).unwrap();

        assert_eq!(s.cooldown_ms, 5000);
        assert_eq!(s.locale, Locale::En);
        assert_eq!(s.inference_interval_ms, DEFAULT_INFERENCE_INTERVAL_MS);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let s = PipelineSettings {
            notify_addr: Some("127.0.0.1:9000".into()),
            ..PipelineSettings::default()
        };

        s.save(&path).unwrap();

        assert_eq!(PipelineSettings::load(&path).unwrap(), s);
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let s = PipelineSettings::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(s, PipelineSettings::default());
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            PipelineSettings::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[rstest]
    #[case(r#"{"inference_interval_ms": 0}"#, "inference_interval_ms")]
    #[case(r#"{"cooldown_ms": 0}"#, "cooldown_ms")]
    #[case(r#"{"acquire_timeout_ms": 0}"#, "acquire_timeout_ms")]
    #[case(r#"{"display_timeout_ms": 0}"#, "display_timeout_ms")]
    fn test_zero_values_rejected(#[case] json: &str, #[case] expected: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, json).unwrap();

        match PipelineSettings::load(&path) {
            Err(ConfigError::Zero { field }) => assert_eq!(field, expected),
            other => panic!("expected zero-value error, got {other:?}"),
        }
    }
}
