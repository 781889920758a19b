//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for reading and writing
//! the configuration bag from a directory of per-category JSON files, and
//! for loading [`Settings`] from YAML.

use std::fs;
use std::path::Path;

use crate::error::{PlannerError, PlannerResult};

use super::settings::Settings;
use super::types::{Category, ConfigBag};

/// Loads and provides access to planner configuration.
///
/// # Directory Structure
///
/// Each category lives in its own file, named exactly as the export
/// produces it. Missing files are empty categories.
/// ```text
/// data/config/
/// ├── members.json
/// ├── Holidays.json
/// ├── Company Days.json
/// ├── PTO.json
/// ├── LOA.json
/// ├── Other.json
/// └── Adjustments.json
/// ```
///
/// # Example
///
/// ```no_run
/// use capacity_planner::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./data/config").unwrap();
/// println!("{} members", loader.config().members.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ConfigBag,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns an error if:
    /// - The directory does not exist
    /// - Any category file contains invalid JSON or the wrong record shape
    pub fn load<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(PlannerError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let mut config = ConfigBag::default();
        for category in Category::CONFIG {
            let file = path.join(format!("{}.json", category.key()));
            if !file.exists() {
                continue;
            }
            let value = Self::load_json(&file)?;
            config
                .set_category_value(category, value)
                .map_err(|e| PlannerError::ConfigParseError {
                    path: file.display().to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self { config })
    }

    /// Like [`ConfigLoader::load`], but a missing directory yields an empty bag.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        match Self::load(path) {
            Err(PlannerError::ConfigNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Writes every configuration category to the directory, creating it if needed.
    pub fn save<P: AsRef<Path>>(path: P, config: &ConfigBag) -> PlannerResult<()> {
        let path = path.as_ref();
        fs::create_dir_all(path).map_err(|e| PlannerError::StorageError {
            message: format!("cannot create {}: {}", path.display(), e),
        })?;

        for category in Category::CONFIG {
            let Some(value) = config.category_value(category) else {
                continue;
            };
            let file = path.join(format!("{}.json", category.key()));
            let content =
                serde_json::to_string_pretty(&value).map_err(|e| PlannerError::StorageError {
                    message: e.to_string(),
                })?;
            fs::write(&file, content).map_err(|e| PlannerError::StorageError {
                message: format!("cannot write {}: {}", file.display(), e),
            })?;
        }
        Ok(())
    }

    /// Loads [`Settings`] from a YAML file.
    pub fn load_settings<P: AsRef<Path>>(path: P) -> PlannerResult<Settings> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PlannerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PlannerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Reads and parses a JSON file.
    fn load_json(path: &Path) -> PlannerResult<serde_json::Value> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PlannerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_json::from_str(&content).map_err(|e| PlannerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Wraps an already-built configuration bag.
    pub fn from_config(config: ConfigBag) -> Self {
        Self { config }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ConfigBag {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ConfigBag {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use crate::models::Holiday;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_reads_present_categories() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "Holidays.json",
            r#"[{"date": "2024-01-01", "description": "New Year"}]"#,
        );
        write(
            dir.path(),
            "members.json",
            r#"[{"id": "m1", "name": "Ana", "includeInCalc": false}]"#,
        );

        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(loader.config().holidays.len(), 1);
        assert_eq!(loader.config().holidays[0].description, "New Year");
        assert!(!loader.config().members[0].include_in_calc);
        assert!(loader.config().pto.is_empty());
    }

    #[test]
    fn test_load_reads_category_names_with_spaces() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "Company Days.json",
            r#"[{"date": "2024-07-05", "description": "Summer break"}]"#,
        );

        let loader = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(loader.config().company_days[0].date, "2024-07-05");
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/planner/config");
        match result {
            Err(PlannerError::ConfigNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_or_default_tolerates_missing_directory() {
        let loader = ConfigLoader::load_or_default("/nonexistent/planner/config").unwrap();
        assert_eq!(loader.config(), &ConfigBag::default());
    }

    #[test]
    fn test_load_invalid_json_returns_parse_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "PTO.json", "[{not json");

        match ConfigLoader::load(dir.path()) {
            Err(PlannerError::ConfigParseError { path, .. }) => assert!(path.ends_with("PTO.json")),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_wrong_shape_returns_parse_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "LOA.json", r#"{"memberId": "m1"}"#);

        assert!(matches!(
            ConfigLoader::load(dir.path()),
            Err(PlannerError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_save_then_load_preserves_config() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("config");
        let config = ConfigBag {
            holidays: vec![Holiday {
                date: "2024-12-25".to_string(),
                description: "Christmas".to_string(),
            }],
            ..ConfigBag::default()
        };

        ConfigLoader::save(&target, &config).unwrap();
        assert!(target.join("Company Days.json").exists());

        let loader = ConfigLoader::load(&target).unwrap();
        assert_eq!(loader.into_config(), config);
    }

    #[test]
    fn test_load_settings_from_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("planner.yaml");
        fs::write(&path, "storage: memory\nbind_address: 0.0.0.0:9000\n").unwrap();

        let settings = ConfigLoader::load_settings(&path).unwrap();
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert_eq!(settings.bind_address, "0.0.0.0:9000");
    }

    #[test]
    fn test_load_settings_missing_file() {
        assert!(matches!(
            ConfigLoader::load_settings("/nonexistent/planner.yaml"),
            Err(PlannerError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_load_settings_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("planner.yaml");
        fs::write(&path, "max_pi_days: [1, 2").unwrap();

        assert!(matches!(
            ConfigLoader::load_settings(&path),
            Err(PlannerError::ConfigParseError { .. })
        ));
    }
}
