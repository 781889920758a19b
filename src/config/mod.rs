//! Configuration loading and management for the capacity planner.
//!
//! This module provides the configuration bag (holidays, company days,
//! absences, adjustments and the member directory), its on-disk directory
//! format, application settings, the resolve-defaults step and
//! export/import of planner state.
//!
//! # Example
//!
//! ```no_run
//! use capacity_planner::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./data/config").unwrap();
//! println!("Loaded {} holidays", loader.config().holidays.len());
//! ```

mod loader;
mod resolved;
mod settings;
mod transfer;
mod types;

pub use loader::ConfigLoader;
pub use resolved::{MemberAbsences, ResolvedConfig};
pub use settings::{Settings, StorageBackend};
pub use transfer::{
    ExportOptions, ImportFile, ImportSummary, SkippedImport, apply_import, build_export,
};
pub use types::{Category, ConfigBag};
