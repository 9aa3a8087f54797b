// Shell configuration read from the environment.
//
// Variables
// - WATCHER_CONFIG: optional path to a JSON file holding one watcher config or an array of them.
//   Without it a single "WatcherOsEvent" watches the whole OS event catalog.
// - WATCHER_DUPLICATE_POLICY: "reject" (default) or "replace".

use crate::adapters::in_memory::in_memory_event_service::DuplicatePolicy;
use crate::core::watcher::descriptor::{FilterConfig, WatcherConfig};
use crate::core::watcher::domain::EventDomain;
use crate::core::watcher::os_event::OsEvent;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const WATCHER_CONFIG_VAR: &str = "WATCHER_CONFIG";
pub const DUPLICATE_POLICY_VAR: &str = "WATCHER_DUPLICATE_POLICY";
pub const DEFAULT_WATCHER_NAME: &str = "WatcherOsEvent";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0}")]
    InvalidPolicy(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WatcherFile {
    Many(Vec<WatcherConfig>),
    One(WatcherConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub watchers: Vec<WatcherConfig>,
    pub duplicate_policy: DuplicatePolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let duplicate_policy = match lookup(DUPLICATE_POLICY_VAR) {
            Some(raw) => raw.parse::<DuplicatePolicy>().map_err(ConfigError::InvalidPolicy)?,
            None => DuplicatePolicy::default(),
        };
        let watchers = match lookup(WATCHER_CONFIG_VAR) {
            Some(path) => read_watchers(PathBuf::from(path))?,
            None => vec![default_watcher()],
        };
        Ok(Self {
            watchers,
            duplicate_policy,
        })
    }
}

fn read_watchers(path: PathBuf) -> Result<Vec<WatcherConfig>, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let file: WatcherFile =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })?;
    Ok(match file {
        WatcherFile::Many(watchers) => watchers,
        WatcherFile::One(watcher) => vec![watcher],
    })
}

pub fn default_watcher() -> WatcherConfig {
    WatcherConfig {
        name: DEFAULT_WATCHER_NAME.to_string(),
        app_event_filters: vec![FilterConfig {
            domain: EventDomain::Os.to_string(),
            names: OsEvent::names(),
        }],
    }
}
