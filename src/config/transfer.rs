//! Export and import of planner state.
//!
//! Every category travels as its own JSON document named `<key>.json`, so
//! any subset can be exported, edited and imported independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::types::{Category, ConfigBag};
use crate::error::PlannerError;
use crate::models::ProgramIncrement;

fn yes() -> bool {
    true
}

/// Which categories to export. Every category is selected by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Export the PIs.
    #[serde(default = "yes")]
    pub pis: bool,
    /// Export the member directory.
    #[serde(default = "yes")]
    pub members: bool,
    /// Export PTO records.
    #[serde(rename = "PTO", default = "yes")]
    pub pto: bool,
    /// Export LOA records.
    #[serde(rename = "LOA", default = "yes")]
    pub loa: bool,
    /// Export Other absence records.
    #[serde(rename = "Other", default = "yes")]
    pub other: bool,
    /// Export capacity adjustments.
    #[serde(rename = "Adjustments", default = "yes")]
    pub adjustments: bool,
    /// Export holidays.
    #[serde(rename = "Holidays", default = "yes")]
    pub holidays: bool,
    /// Export company days.
    #[serde(rename = "Company Days", default = "yes")]
    pub company_days: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pis: true,
            members: true,
            pto: true,
            loa: true,
            other: true,
            adjustments: true,
            holidays: true,
            company_days: true,
        }
    }
}

impl ExportOptions {
    /// Whether a category is selected.
    pub fn includes(&self, category: Category) -> bool {
        match category {
            Category::Pis => self.pis,
            Category::Members => self.members,
            Category::Pto => self.pto,
            Category::Loa => self.loa,
            Category::Other => self.other,
            Category::Adjustments => self.adjustments,
            Category::Holidays => self.holidays,
            Category::CompanyDays => self.company_days,
        }
    }

    /// The selected categories, in export order.
    pub fn selected(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| self.includes(*c))
    }
}

/// Builds one JSON document per selected category, keyed by category key.
///
/// # Example
///
/// ```
/// use capacity_planner::config::{ConfigBag, ExportOptions, build_export};
///
/// let options = ExportOptions {
///     pis: false,
///     ..ExportOptions::default()
/// };
/// let bundle = build_export(&options, &[], &ConfigBag::default());
/// assert!(!bundle.contains_key("pis"));
/// assert_eq!(bundle["Company Days"], serde_json::json!([]));
/// ```
pub fn build_export(
    options: &ExportOptions,
    pis: &[ProgramIncrement],
    config: &ConfigBag,
) -> BTreeMap<String, serde_json::Value> {
    options
        .selected()
        .filter_map(|category| {
            let value = match category {
                Category::Pis => serde_json::to_value(pis).ok(),
                _ => config.category_value(category),
            };
            value.map(|v| (category.key().to_string(), v))
        })
        .collect()
}

/// One named document to import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// The file name, such as `PTO.json`. The `.json` suffix is optional.
    pub name: String,
    /// The raw JSON text.
    pub content: String,
}

impl ImportFile {
    /// Creates an import document.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The category key named by the file.
    pub fn key(&self) -> &str {
        self.name.strip_suffix(".json").unwrap_or(&self.name)
    }
}

/// A document that was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedImport {
    /// The file name as given.
    pub name: String,
    /// Why it was skipped.
    pub message: String,
}

/// The outcome of [`apply_import`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Keys of the categories that were replaced, in file order.
    pub imported: Vec<String>,
    /// Files that were skipped.
    pub skipped: Vec<SkippedImport>,
}

impl ImportSummary {
    /// Whether the PIs were replaced.
    pub fn imported_pis(&self) -> bool {
        self.imported.iter().any(|k| k == Category::Pis.key())
    }

    /// Whether any configuration category was replaced.
    pub fn imported_config(&self) -> bool {
        self.imported.iter().any(|k| k != Category::Pis.key())
    }
}

/// Applies each document to the PIs or the configuration bag.
///
/// A document replaces its whole category. Files that do not parse, do not
/// match their category's record shape, or name an unknown category are
/// skipped with a warning and reported in the summary; the remaining files
/// still apply.
pub fn apply_import(
    files: &[ImportFile],
    pis: &mut Vec<ProgramIncrement>,
    config: &mut ConfigBag,
) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for file in files {
        match apply_one(file, pis, config) {
            Ok(category) => summary.imported.push(category.key().to_string()),
            Err(err) => {
                warn!(file = %file.name, error = %err, "Skipping import file");
                summary.skipped.push(SkippedImport {
                    name: file.name.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        imported = summary.imported.len(),
        skipped = summary.skipped.len(),
        "Import finished"
    );
    summary
}

fn apply_one(
    file: &ImportFile,
    pis: &mut Vec<ProgramIncrement>,
    config: &mut ConfigBag,
) -> Result<Category, PlannerError> {
    let import_error = |message: String| PlannerError::ImportError {
        name: file.name.clone(),
        message,
    };

    let category = Category::from_key(file.key())
        .ok_or_else(|| import_error(format!("unknown category '{}'", file.key())))?;

    match category {
        Category::Pis => {
            *pis = serde_json::from_str(&file.content).map_err(|e| import_error(e.to_string()))?;
        }
        _ => {
            let value: serde_json::Value =
                serde_json::from_str(&file.content).map_err(|e| import_error(e.to_string()))?;
            config
                .set_category_value(category, value)
                .map_err(|e| import_error(e.to_string()))?;
        }
    }
    Ok(category)
}
