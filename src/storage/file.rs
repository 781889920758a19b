//! PI storage backed by a single JSON file.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::PiStore;
use crate::error::{PlannerError, PlannerResult};
use crate::models::ProgramIncrement;

/// Stores PIs as one pretty-printed JSON array on disk.
///
/// A missing file loads as an empty list; parent directories are created on
/// first save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, err: impl std::fmt::Display) -> PlannerError {
        PlannerError::StorageError {
            message: format!("cannot {} {}: {}", action, self.path.display(), err),
        }
    }
}

impl PiStore for JsonFileStore {
    fn load(&self) -> PlannerResult<Vec<ProgramIncrement>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No PI file yet, starting empty");
            return Ok(Vec::new());
        }
        let file = File::open(&self.path).map_err(|e| self.storage_error("open", e))?;
        let pis: Vec<ProgramIncrement> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| self.storage_error("parse", e))?;
        debug!(path = %self.path.display(), count = pis.len(), "Loaded PIs");
        Ok(pis)
    }

    fn save(&self, pis: &[ProgramIncrement]) -> PlannerResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error("create directory for", e))?;
        }
        let file = File::create(&self.path).map_err(|e| self.storage_error("create", e))?;
        serde_json::to_writer_pretty(file, pis).map_err(|e| self.storage_error("write", e))?;
        debug!(path = %self.path.display(), count = pis.len(), "Saved PIs");
        Ok(())
    }
}
