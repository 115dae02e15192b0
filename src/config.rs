//! Workshop configuration.
//!
//! Read from `<config_dir>/serviceability-workshop/config.toml`. Every
//! section and key is optional; anything missing takes its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::WorkshopError;
use crate::impact::{default_rules, load_rules, ImpactEstimator};

const APP_DIR: &str = "serviceability-workshop";
const CONFIG_FILE: &str = "config.toml";
const LIBRARY_FILE: &str = "scenarios.db";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub impact: ImpactConfig,
}

/// Serviceability calculation service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Keychain service name the API key is stored under.
    pub keyring_service: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
            keyring_service: APP_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where the scenario library lives. Defaults to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    /// Override file for the impact heuristics.
    pub rules_path: Option<PathBuf>,
}

impl WorkshopConfig {
    /// `<config_dir>/serviceability-workshop/config.toml`, if the platform
    /// has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from `path`, or from [`default_path`](Self::default_path) when
    /// `None`. An explicit path must exist; a missing default file yields
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, WorkshopError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => {
                    debug!("No platform config dir, using default configuration");
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            if required {
                return Err(WorkshopError::Config(format!(
                    "Config file not found: {:?}",
                    path
                )));
            }
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| WorkshopError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        let config: WorkshopConfig = toml::from_str(&content)
            .map_err(|e| WorkshopError::Config(format!("Invalid config {:?}: {}", path, e)))?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// SQLite file backing the scenario library.
    pub fn library_path(&self) -> PathBuf {
        self.data_dir().join(LIBRARY_FILE)
    }

    /// Estimator built from the configured rules file, or the embedded
    /// defaults.
    pub fn impact_estimator(&self) -> Result<ImpactEstimator, WorkshopError> {
        let rules = match &self.impact.rules_path {
            Some(path) => load_rules(path).map_err(|e| WorkshopError::Config(format!("{:#}", e)))?,
            None => default_rules(),
        };
        Ok(ImpactEstimator::new(rules))
    }
}
