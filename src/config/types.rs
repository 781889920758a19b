//! Configuration types for capacity planning.
//!
//! The configuration bag is keyed by category name exactly as it is exported
//! and imported. Any subset of the keys may be present; missing (or `null`)
//! categories load as empty lists.

use serde::{Deserialize, Serialize};

use crate::models::{Adjustment, CompanyDay, Holiday, LeaveKind, LeaveRecord, Member};
use crate::models::lenient;

/// A named, independently exportable category of persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Program Increments (with sprints and teams).
    Pis,
    /// The member directory.
    Members,
    /// Public holidays.
    Holidays,
    /// Company-wide days off.
    CompanyDays,
    /// Paid time off.
    Pto,
    /// Leaves of absence.
    Loa,
    /// Other absences.
    Other,
    /// Per-member capacity adjustments.
    Adjustments,
}

impl Category {
    /// Every category, in export order.
    pub const ALL: [Category; 8] = [
        Category::Pis,
        Category::Members,
        Category::Pto,
        Category::Loa,
        Category::Other,
        Category::Adjustments,
        Category::Holidays,
        Category::CompanyDays,
    ];

    /// The categories stored in the configuration bag.
    pub const CONFIG: [Category; 7] = [
        Category::Members,
        Category::Holidays,
        Category::CompanyDays,
        Category::Pto,
        Category::Loa,
        Category::Other,
        Category::Adjustments,
    ];

    /// The category's key, which is also its export file stem.
    pub fn key(self) -> &'static str {
        match self {
            Category::Pis => "pis",
            Category::Members => "members",
            Category::Holidays => "Holidays",
            Category::CompanyDays => "Company Days",
            Category::Pto => "PTO",
            Category::Loa => "LOA",
            Category::Other => "Other",
            Category::Adjustments => "Adjustments",
        }
    }

    /// Looks a category up by key. `Team Members` is accepted for the directory.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Team Members" => Some(Category::Members),
            _ => Self::ALL.into_iter().find(|c| c.key() == key),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// All configuration the enrichment pipeline joins against.
///
/// # Example
///
/// ```
/// use capacity_planner::config::ConfigBag;
///
/// let bag: ConfigBag = serde_json::from_str(r#"{
///     "Holidays": [{"date": "2024-01-01", "description": "New Year"}],
///     "PTO": null
/// }"#).unwrap();
/// assert_eq!(bag.holidays.len(), 1);
/// assert!(bag.pto.is_empty());
/// assert!(bag.members.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigBag {
    /// Public holidays.
    #[serde(rename = "Holidays", default, deserialize_with = "lenient::list")]
    pub holidays: Vec<Holiday>,
    /// Company-wide days off.
    #[serde(rename = "Company Days", default, deserialize_with = "lenient::list")]
    pub company_days: Vec<CompanyDay>,
    /// PTO records.
    #[serde(rename = "PTO", default, deserialize_with = "lenient::list")]
    pub pto: Vec<LeaveRecord>,
    /// LOA records.
    #[serde(rename = "LOA", default, deserialize_with = "lenient::list")]
    pub loa: Vec<LeaveRecord>,
    /// Other absence records.
    #[serde(rename = "Other", default, deserialize_with = "lenient::list")]
    pub other: Vec<LeaveRecord>,
    /// Capacity adjustments.
    #[serde(rename = "Adjustments", default, deserialize_with = "lenient::list")]
    pub adjustments: Vec<Adjustment>,
    /// The member directory.
    #[serde(
        rename = "members",
        alias = "Team Members",
        default,
        deserialize_with = "lenient::list"
    )]
    pub members: Vec<Member>,
}

impl ConfigBag {
    /// Returns the leave records of one kind.
    pub fn leave(&self, kind: LeaveKind) -> &[LeaveRecord] {
        match kind {
            LeaveKind::Pto => &self.pto,
            LeaveKind::Loa => &self.loa,
            LeaveKind::Other => &self.other,
        }
    }

    /// Serialises one category as a standalone JSON document.
    ///
    /// Returns `None` for [`Category::Pis`], which is not part of the bag.
    pub fn category_value(&self, category: Category) -> Option<serde_json::Value> {
        let value = match category {
            Category::Pis => return None,
            Category::Members => serde_json::to_value(&self.members),
            Category::Holidays => serde_json::to_value(&self.holidays),
            Category::CompanyDays => serde_json::to_value(&self.company_days),
            Category::Pto => serde_json::to_value(&self.pto),
            Category::Loa => serde_json::to_value(&self.loa),
            Category::Other => serde_json::to_value(&self.other),
            Category::Adjustments => serde_json::to_value(&self.adjustments),
        };
        value.ok()
    }

    /// Replaces one category from a standalone JSON document.
    pub fn set_category_value(
        &mut self,
        category: Category,
        value: serde_json::Value,
    ) -> Result<(), serde_json::Error> {
        match category {
            Category::Pis => {}
            Category::Members => self.members = serde_json::from_value(value)?,
            Category::Holidays => self.holidays = serde_json::from_value(value)?,
            Category::CompanyDays => self.company_days = serde_json::from_value(value)?,
            Category::Pto => self.pto = serde_json::from_value(value)?,
            Category::Loa => self.loa = serde_json::from_value(value)?,
            Category::Other => self.other = serde_json::from_value(value)?,
            Category::Adjustments => self.adjustments = serde_json::from_value(value)?,
        }
        Ok(())
    }
}
