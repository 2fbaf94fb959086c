use super::ConfigError;
use crate::router::StreamKind;
use crate::selected_output::DEFAULT_DELIMITER;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub file_names: BTreeMap<StreamKind, String>,
    #[serde(default)]
    pub switches: SwitchSettings,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub event_log: Option<PathBuf>,
}

/// Initial values of the routing switches; every switch starts off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SwitchSettings {
    #[serde(default)]
    pub output_file: bool,
    #[serde(default)]
    pub log_file: bool,
    #[serde(default)]
    pub error_file: bool,
    #[serde(default)]
    pub dump_file: bool,
    #[serde(default)]
    pub dump_string: bool,
    #[serde(default)]
    pub selected_output_file: bool,
    #[serde(default)]
    pub output_string: bool,
    #[serde(default)]
    pub log_string: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_names: BTreeMap::new(),
            switches: SwitchSettings::default(),
            delimiter: default_delimiter(),
            event_log: None,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::Settings(
                "`delimiter` must be non-empty".to_string(),
            ));
        }
        if self.delimiter.contains(['\n', '\r']) {
            return Err(ConfigError::Settings(
                "`delimiter` must not contain a line terminator".to_string(),
            ));
        }
        for (kind, name) in &self.file_names {
            if name.trim().is_empty() {
                return Err(ConfigError::Settings(format!(
                    "file name for stream `{kind}` must be non-empty"
                )));
            }
            if name.contains(['/', '\\']) {
                return Err(ConfigError::Settings(format!(
                    "file name for stream `{kind}` must not contain a path separator; use `output_dir`"
                )));
            }
        }
        Ok(())
    }

    pub fn file_name(&self, kind: StreamKind) -> &str {
        self.file_names
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_file_name())
    }

    pub fn sink_path(&self, kind: StreamKind) -> PathBuf {
        self.output_dir.join(self.file_name(kind))
    }
}
