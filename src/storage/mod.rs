//! Persistence for Program Increments.
//!
//! The calculation core never touches storage. Callers load PIs through a
//! [`PiStore`], enrich them, and save the raw records back.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::error::PlannerResult;
use crate::models::ProgramIncrement;

/// Loads and saves the full list of PIs.
///
/// Saving replaces everything previously stored.
pub trait PiStore: Send + Sync {
    /// Loads every stored PI. An empty store yields an empty list.
    fn load(&self) -> PlannerResult<Vec<ProgramIncrement>>;

    /// Replaces the stored PIs.
    fn save(&self, pis: &[ProgramIncrement]) -> PlannerResult<()>;
}
