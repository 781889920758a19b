//! Application settings.
//!
//! Settings are read from a YAML file. Every field has a default, so an
//! empty file (or none at all) yields a working local setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::calculation::{DEFAULT_MAX_PI_DAYS, DEFAULT_MAX_SPRINT_DAYS, ValidationLimits};

/// Where PI data is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// A `pis.json` file in the data directory.
    #[default]
    File,
    /// Process memory; lost on exit.
    Memory,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_max_pi_days() -> i64 {
    DEFAULT_MAX_PI_DAYS
}

fn default_max_sprint_days() -> i64 {
    DEFAULT_MAX_SPRINT_DAYS
}

/// Settings for the planner service.
///
/// # Example
///
/// ```
/// use capacity_planner::config::{Settings, StorageBackend};
///
/// let yaml = "storage: memory\nmax_sprint_days: 14\n";
/// let settings: Settings = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(settings.storage, StorageBackend::Memory);
/// assert_eq!(settings.limits().max_sprint_days, 14);
/// assert_eq!(settings.bind_address, "127.0.0.1:3000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Address the HTTP service listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Directory holding `pis.json` and the configuration category files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Storage backend for PI data.
    #[serde(default)]
    pub storage: StorageBackend,
    /// Longest allowed PI, in days.
    #[serde(default = "default_max_pi_days")]
    pub max_pi_days: i64,
    /// Longest allowed sprint, in days.
    #[serde(default = "default_max_sprint_days")]
    pub max_sprint_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            data_dir: default_data_dir(),
            storage: StorageBackend::default(),
            max_pi_days: default_max_pi_days(),
            max_sprint_days: default_max_sprint_days(),
        }
    }
}

impl Settings {
    /// The validation limits these settings describe.
    pub fn limits(&self) -> ValidationLimits {
        ValidationLimits {
            max_pi_days: self.max_pi_days,
            max_sprint_days: self.max_sprint_days,
        }
    }

    /// Path of the PI document in the data directory.
    pub fn pis_path(&self) -> PathBuf {
        self.data_dir.join("pis.json")
    }

    /// Directory holding the configuration category files.
    pub fn config_dir(&self) -> PathBuf {
        self.data_dir.join("config")
    }
}
