use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use linkqa_core::{FormSettings, MinEntries, DEFAULT_QUERY};
use linkqa_engine::ClientSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "linkqa.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub form: FormConfig,
    pub log: LogDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub query_path: String,
    pub summary_path: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let defaults = ClientSettings::default();
        Self {
            base_url: defaults.base_url,
            query_path: defaults.query_path,
            summary_path: defaults.summary_path,
            connect_timeout_secs: defaults.connect_timeout.as_secs(),
            request_timeout_secs: defaults.request_timeout.as_secs(),
            max_response_bytes: defaults.max_response_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MinEntriesConfig {
    Zero,
    #[default]
    One,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub min_entries: MinEntriesConfig,
    pub default_query: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_entries: MinEntriesConfig::default(),
            default_query: DEFAULT_QUERY.to_string(),
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.service.base_url.clone(),
            query_path: self.service.query_path.clone(),
            summary_path: self.service.summary_path.clone(),
            connect_timeout: Duration::from_secs(self.service.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.service.request_timeout_secs),
            max_response_bytes: self.service.max_response_bytes,
        }
    }

    pub fn form_settings(&self) -> FormSettings {
        FormSettings {
            min_entries: match self.form.min_entries {
                MinEntriesConfig::Zero => MinEntries::Zero,
                MinEntriesConfig::One => MinEntries::One,
            },
            default_query: self.form.default_query.clone(),
        }
    }
}

/// Loads the configuration.
///
/// Without an explicit path a missing `./linkqa.ron` just means defaults; an
/// explicit path that cannot be read is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    parse_config(&content).map_err(|message| ConfigError::Parse { path, message })
}

fn parse_config(content: &str) -> Result<AppConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}
