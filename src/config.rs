use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = ".fleetdesk.json";

fn default_poll_ms() -> u64 {
    50
}

/// Per-directory shell configuration. Everything is optional; a missing file
/// means defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Tab to open on launch (slug form: "employees", "drivers", ...).
    #[serde(default)]
    pub start_tab: Option<String>,

    /// Show absolute timestamps in view chrome instead of "3m ago".
    #[serde(default)]
    pub absolute_timestamps: bool,

    /// Input poll interval for the event loop.
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_tab: None,
            absolute_timestamps: false,
            poll_ms: default_poll_ms(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ShellConfig {
    /// Load `.fleetdesk.json` from the given directory. A missing file is
    /// fine (defaults); a malformed one is an error worth stopping for.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source: err,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            source: err,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let config = ShellConfig::load_from(tmp.path()).expect("load");
        assert_eq!(config.start_tab, None);
        assert_eq!(config.poll_ms, 50);
        assert!(!config.absolute_timestamps);
    }

    #[test]
    fn partial_file_keeps_field_defaults() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join(CONFIG_FILE), r#"{"start_tab":"drivers"}"#).expect("write");

        let config = ShellConfig::load_from(tmp.path()).expect("load");
        assert_eq!(config.start_tab.as_deref(), Some("drivers"));
        assert_eq!(config.poll_ms, 50);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join(CONFIG_FILE), "{not json").expect("write");

        match ShellConfig::load_from(tmp.path()) {
            Err(ConfigError::Parse { path, .. }) => assert!(path.ends_with(CONFIG_FILE)),
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }
}
