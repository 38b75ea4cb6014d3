//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::location::{LocationError, LocationTable};
use crate::core::rules::Rules;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".regform.yaml";

/// regform configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location table replacing the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<PathBuf>,

    /// Extra disposable email domains, added to the built-in list
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disposable_domains: Vec<String>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Log filter (error, warn, info, debug, trace)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/regform/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (./.regform.yaml)
        if let Some(local) = Self::read_file(&Self::local_config_path()) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(path) = std::env::var("REGFORM_LOCATIONS") {
            if !path.is_empty() {
                config.locations = Some(PathBuf::from(path));
            }
        }
        if let Ok(level) = std::env::var("REGFORM_LOG") {
            if !level.is_empty() {
                config.log_level = Some(level);
            }
        }

        config
    }

    /// Read one config file; unreadable or malformed files are skipped
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("cannot read config {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => {
                log::debug!("merging config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("ignoring malformed config {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "regform")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Get the path to the local config file
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.locations.is_some() {
            self.locations = other.locations;
        }
        for domain in other.disposable_domains {
            if !self.disposable_domains.contains(&domain) {
                self.disposable_domains.push(domain);
            }
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }

    /// The location table: the configured file, or the built-in one
    pub fn location_table(&self) -> Result<LocationTable, LocationError> {
        match &self.locations {
            Some(path) => LocationTable::load(path),
            None => LocationTable::embedded(),
        }
    }

    /// Validation rules with the configured extra domains
    pub fn rules(&self) -> Rules {
        Rules::with_extra_domains(self.disposable_domains.iter().cloned())
    }
}
