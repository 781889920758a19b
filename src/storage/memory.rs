//! In-process PI storage.

use std::sync::RwLock;

use super::PiStore;
use crate::error::{PlannerError, PlannerResult};
use crate::models::ProgramIncrement;

/// Keeps PIs in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pis: RwLock<Vec<ProgramIncrement>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `pis`.
    pub fn with_pis(pis: Vec<ProgramIncrement>) -> Self {
        Self {
            pis: RwLock::new(pis),
        }
    }
}

fn poisoned() -> PlannerError {
    PlannerError::StorageError {
        message: "in-memory store lock poisoned".to_string(),
    }
}

impl PiStore for InMemoryStore {
    fn load(&self) -> PlannerResult<Vec<ProgramIncrement>> {
        self.pis.read().map(|pis| pis.clone()).map_err(|_| poisoned())
    }

    fn save(&self, pis: &[ProgramIncrement]) -> PlannerResult<()> {
        let mut guard = self.pis.write().map_err(|_| poisoned())?;
        *guard = pis.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        assert!(InMemoryStore::new().load().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_contents() {
        let first = ProgramIncrement::new("PI 1", "2024-01-01", "2024-03-29");
        let second = ProgramIncrement::new("PI 2", "2024-04-01", "2024-06-28");
        let store = InMemoryStore::with_pis(vec![first]);

        store.save(std::slice::from_ref(&second)).unwrap();
        assert_eq!(store.load().unwrap(), vec![second]);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let store: Box<dyn PiStore> = Box::new(InMemoryStore::new());
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
