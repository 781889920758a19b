//! Application state for the capacity planner API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::calculation::ValidationLimits;
use crate::config::ConfigBag;
use crate::storage::PiStore;

/// Shared application state.
///
/// Holds the PI store, the live configuration bag and the validation limits.
/// Writes go through [`AppState::begin_edit`] so that only one edit runs at
/// a time and each one sees the result of the last.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PiStore>,
    config: Arc<RwLock<ConfigBag>>,
    edits: Arc<Mutex<()>>,
    limits: ValidationLimits,
    config_dir: Option<PathBuf>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: Arc<dyn PiStore>, config: ConfigBag, limits: ValidationLimits) -> Self {
        Self {
            store,
            config: Arc::new(RwLock::new(config)),
            edits: Arc::new(Mutex::new(())),
            limits,
            config_dir: None,
        }
    }

    /// Persists configuration changes to `dir`.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = Some(dir.into());
        self
    }

    /// The PI store.
    pub fn store(&self) -> &dyn PiStore {
        self.store.as_ref()
    }

    /// The live configuration bag.
    pub fn config(&self) -> &RwLock<ConfigBag> {
        &self.config
    }

    /// The limits applied by write-time validation.
    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Where configuration changes are written, if anywhere.
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// Waits for any running edit to finish and claims the edit slot.
    pub async fn begin_edit(&self) -> MutexGuard<'_, ()> {
        self.edits.lock().await
    }
}
