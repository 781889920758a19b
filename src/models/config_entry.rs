//! Configuration record types.
//!
//! One explicit record type per configuration category. Holidays and company
//! days apply to everyone; leave records and adjustments apply to the member
//! they reference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// A public holiday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The holiday date (`yyyy-mm-dd`).
    #[serde(default)]
    pub date: String,
    /// Shown as the tooltip for the day column.
    #[serde(default)]
    pub description: String,
}

/// A company-wide non-working day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDay {
    /// The date (`yyyy-mm-dd`).
    #[serde(default)]
    pub date: String,
    /// Shown as the tooltip for the day column.
    #[serde(default)]
    pub description: String,
}

/// The kind of an individual absence.
///
/// The declaration order is also the display precedence when a member has
/// more than one absence recorded on the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeaveKind {
    /// Paid time off.
    #[serde(rename = "PTO")]
    Pto,
    /// Leave of absence.
    #[serde(rename = "LOA")]
    Loa,
    /// Any other absence; these records may carry comments.
    Other,
}

impl std::fmt::Display for LeaveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveKind::Pto => write!(f, "PTO"),
            LeaveKind::Loa => write!(f, "LOA"),
            LeaveKind::Other => write!(f, "Other"),
        }
    }
}

/// A single day of individual absence (PTO, LOA or Other).
///
/// # Example
///
/// ```
/// use capacity_planner::models::LeaveRecord;
///
/// let record: LeaveRecord = serde_json::from_str(
///     r#"{"memberId": "m1", "date": "2024-01-03", "comments": "dentist"}"#,
/// ).unwrap();
/// assert_eq!(record.comments.as_deref(), Some("dentist"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRecord {
    /// The absent member's id.
    #[serde(default)]
    pub member_id: String,
    /// The absence date (`yyyy-mm-dd`).
    #[serde(default)]
    pub date: String,
    /// Free-form notes; only the Other category uses them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// A per-member capacity adjustment in hours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    /// The adjusted member's id.
    #[serde(default)]
    pub member_id: String,
    /// The date the adjustment was recorded.
    #[serde(default)]
    pub date: String,
    /// Why the adjustment was made.
    #[serde(default)]
    pub reason: String,
    /// Hours added to (or removed from) the member's capacity.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub offset: Decimal,
}
