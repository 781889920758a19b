//! Program Increment and sprint models.
//!
//! This module contains the [`ProgramIncrement`], [`Sprint`] and
//! [`MemberAssignment`] records as they are persisted by the storage
//! collaborator. Dates are kept as the raw `yyyy-mm-dd` strings the user
//! entered so that one malformed record never prevents the rest of a
//! document from loading.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;

/// The derived capacity block of a [`MemberAssignment`].
///
/// Every field is recomputed by the enrichment pipeline and is never edited
/// by hand. Missing or malformed values in stored documents load as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityResult {
    /// Business days in the sprint lost to holidays and company days.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub team_days_out: i64,
    /// Business days the member is individually absent (PTO, LOA, Other).
    #[serde(default, deserialize_with = "lenient::integer")]
    pub individual_days_out: i64,
    /// Business days left after team and individual days out. May be negative.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub individual_days_avail: i64,
    /// Available working hours, including the member's offset.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub capacity: i64,
    /// Capacity expressed back in working days.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub estimated_velocity: i64,
    /// Points-to-hours figure; mirrors `estimated_velocity`.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub p2h: i64,
}

/// A member's seat on a sprint team.
///
/// The member is referenced by id only. An empty id is a valid, unassigned
/// row.
///
/// # Example
///
/// ```
/// use capacity_planner::models::MemberAssignment;
///
/// let row: MemberAssignment = serde_json::from_str(
///     r#"{"memberId": "m1", "plannedVelocity": "8", "capacity": 31}"#,
/// ).unwrap();
/// assert_eq!(row.member_id, "m1");
/// assert_eq!(row.derived.capacity, 31);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAssignment {
    /// The referenced member's directory id, or empty when unassigned.
    #[serde(default)]
    pub member_id: String,
    /// The velocity the team planned for this member.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub planned_velocity: Decimal,
    /// The velocity the member actually delivered.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub actual_velocity: Decimal,
    /// Derived capacity numbers.
    #[serde(flatten)]
    pub derived: CapacityResult,
}

impl MemberAssignment {
    /// Creates an empty row with no member selected.
    pub fn unassigned() -> Self {
        Self::default()
    }

    /// Creates a row for the given member.
    pub fn for_member(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if no member has been selected for this row.
    pub fn is_unassigned(&self) -> bool {
        self.member_id.trim().is_empty()
    }
}

impl AsRef<MemberAssignment> for MemberAssignment {
    fn as_ref(&self) -> &MemberAssignment {
        self
    }
}

/// A sprint inside a Program Increment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Unique identifier for the sprint.
    #[serde(default)]
    pub id: String,
    /// Display name of the sprint.
    #[serde(rename = "sprint", default)]
    pub name: String,
    /// First day of the sprint (`yyyy-mm-dd`).
    #[serde(default)]
    pub start: String,
    /// Last day of the sprint, inclusive.
    #[serde(default)]
    pub end: String,
    /// The sprint team, in display order.
    #[serde(default, deserialize_with = "lenient::list")]
    pub team: Vec<MemberAssignment>,
}

impl Sprint {
    /// Creates a sprint with a fresh id and an empty team.
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            start: start.into(),
            end: end.into(),
            team: Vec::new(),
        }
    }
}

/// A Program Increment: a planning period made of sprints.
///
/// # Example
///
/// ```
/// use capacity_planner::models::ProgramIncrement;
///
/// let pi = ProgramIncrement::new("PI 24.1", "2024-01-01", "2024-03-29");
/// assert_eq!(pi.sprints.len(), 1);
/// assert_eq!(pi.sprints[0].name, "Sprint 1");
/// assert_eq!(pi.sprints[0].start, "2024-01-01");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramIncrement {
    /// Unique, stable identifier for the PI.
    #[serde(default)]
    pub id: String,
    /// Display name of the PI.
    #[serde(rename = "pi", default)]
    pub name: String,
    /// First day of the PI (`yyyy-mm-dd`).
    #[serde(default)]
    pub start: String,
    /// Last day of the PI, inclusive.
    #[serde(default)]
    pub end: String,
    /// The sprints of this PI, in order.
    #[serde(default, deserialize_with = "lenient::list")]
    pub sprints: Vec<Sprint>,
}

impl ProgramIncrement {
    /// Creates a PI with a fresh id and a single sprint spanning the whole PI.
    pub fn new(name: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        let start = start.into();
        let end = end.into();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            sprints: vec![Sprint::new("Sprint 1", start.clone(), end.clone())],
            start,
            end,
        }
    }

    /// Finds a sprint by id.
    pub fn sprint(&self, sprint_id: &str) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == sprint_id)
    }
}
