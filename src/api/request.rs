//! Request types for the capacity planner API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{ConfigBag, ImportFile};
use crate::models::ProgramIncrement;

/// Request body for `POST /api/enrich`.
///
/// Both fields are optional; missing ones are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichRequest {
    /// The PIs to enrich.
    #[serde(default)]
    pub pis: Vec<ProgramIncrement>,
    /// The configuration to enrich against.
    #[serde(default)]
    pub config: ConfigBag,
}

/// Request body for `POST /api/import`: documents keyed by category.
///
/// ```json
/// { "PTO": [{"memberId": "m1", "date": "2024-01-03"}], "Holidays": [] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportBundle(pub BTreeMap<String, serde_json::Value>);

impl ImportBundle {
    /// Turns each entry into a `<key>.json` import file.
    pub fn into_files(self) -> Vec<ImportFile> {
        self.0
            .into_iter()
            .map(|(key, value)| ImportFile::new(format!("{}.json", key), value.to_string()))
            .collect()
    }
}
