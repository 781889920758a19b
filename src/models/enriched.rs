//! Enriched view models.
//!
//! This module contains the fully-computed [`EnrichedPi`] graph produced by
//! the enrichment pipeline. Each enriched record carries its raw
//! counterpart's fields plus the resolved configuration needed to render it,
//! and can be turned back into the raw record for persistence.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{LeaveKind, MemberAssignment, ProgramIncrement, Sprint};
use crate::calculation::DayInfo;

/// Why a whole day is out for the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamDayKind {
    /// A public holiday.
    Holiday,
    /// A company-wide day off.
    CompanyDay,
}

impl std::fmt::Display for TeamDayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamDayKind::Holiday => write!(f, "Holiday"),
            TeamDayKind::CompanyDay => write!(f, "Company"),
        }
    }
}

/// A sprint team row with its resolved absences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAssignment {
    /// The assignment with its derived fields recomputed.
    #[serde(flatten)]
    pub assignment: MemberAssignment,
    /// The member's directory name, if the id is known.
    pub member_name: Option<String>,
    /// Whether the row counts toward sprint totals.
    pub include_in_calc: bool,
    /// The member's PTO dates.
    pub pto_dates: Vec<String>,
    /// The member's LOA dates.
    pub loa_dates: Vec<String>,
    /// The member's Other absence dates.
    pub other_dates: Vec<String>,
    /// Comments on Other absences, keyed by date.
    pub other_comments: BTreeMap<String, String>,
}

impl EnrichedAssignment {
    /// Returns the absence recorded for this member on `date_key`.
    ///
    /// PTO takes precedence over LOA, which takes precedence over Other.
    pub fn impact_on(&self, date_key: &str) -> Option<LeaveKind> {
        [
            (LeaveKind::Pto, &self.pto_dates),
            (LeaveKind::Loa, &self.loa_dates),
            (LeaveKind::Other, &self.other_dates),
        ]
        .into_iter()
        .find(|(_, dates)| dates.iter().any(|d| d == date_key))
        .map(|(kind, _)| kind)
    }
}

impl AsRef<MemberAssignment> for EnrichedAssignment {
    fn as_ref(&self) -> &MemberAssignment {
        &self.assignment
    }
}

/// A sprint with every team row computed and its totals attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSprint {
    /// The sprint id.
    pub id: String,
    /// The sprint name.
    #[serde(rename = "sprint")]
    pub name: String,
    /// First day (`yyyy-mm-dd`).
    pub start: String,
    /// Last day, inclusive.
    pub end: String,
    /// Business-day columns; empty if the dates cannot be expanded.
    pub weekdays: Vec<DayInfo>,
    /// Business days that are holidays or company days.
    pub team_days_out: i64,
    /// Whether the sprint's range is valid and lies inside its PI.
    pub dates_valid: bool,
    /// The enriched team.
    pub team: Vec<EnrichedAssignment>,
    /// Sum of `p2h` over included members.
    pub total_sprint_velocity: i64,
    /// Included members' capacity hours, expressed in days.
    pub total_capacity: i64,
}

impl EnrichedSprint {
    /// Rebuilds the raw sprint, keeping the recomputed derived fields.
    pub fn to_sprint(&self) -> Sprint {
        Sprint {
            id: self.id.clone(),
            name: self.name.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            team: self.team.iter().map(|row| row.assignment.clone()).collect(),
        }
    }
}

/// A Program Increment ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPi {
    /// The PI id.
    pub id: String,
    /// The PI name.
    #[serde(rename = "pi")]
    pub name: String,
    /// First day (`yyyy-mm-dd`).
    pub start: String,
    /// Last day, inclusive.
    pub end: String,
    /// Holiday dates.
    pub holidays: Vec<String>,
    /// Holiday descriptions by date.
    pub holiday_descriptions: BTreeMap<String, String>,
    /// Company day dates.
    pub company_days: Vec<String>,
    /// Company day descriptions by date.
    pub company_descriptions: BTreeMap<String, String>,
    /// The enriched sprints.
    pub sprints: Vec<EnrichedSprint>,
}

impl EnrichedPi {
    /// Rebuilds the raw PI, keeping the recomputed derived fields.
    ///
    /// # Example
    ///
    /// ```
    /// use capacity_planner::calculation::enrich_pis;
    /// use capacity_planner::config::ConfigBag;
    /// use capacity_planner::models::{MemberAssignment, ProgramIncrement};
    ///
    /// let mut pi = ProgramIncrement::new("PI 1", "2024-01-01", "2024-01-05");
    /// pi.sprints[0].team.push(MemberAssignment::for_member("m1"));
    ///
    /// let enriched = enrich_pis(&[pi], &ConfigBag::default());
    /// let raw = enriched[0].to_program_increment();
    /// assert_eq!(raw.sprints[0].team[0].derived.capacity, 31);
    /// ```
    pub fn to_program_increment(&self) -> ProgramIncrement {
        ProgramIncrement {
            id: self.id.clone(),
            name: self.name.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            sprints: self.sprints.iter().map(EnrichedSprint::to_sprint).collect(),
        }
    }

    /// Returns the team-wide reason a day is out, with its description.
    ///
    /// Holidays take precedence over company days.
    pub fn day_impact(&self, date_key: &str) -> Option<(TeamDayKind, &str)> {
        if self.holidays.iter().any(|d| d == date_key) {
            let description = self
                .holiday_descriptions
                .get(date_key)
                .map_or("", String::as_str);
            return Some((TeamDayKind::Holiday, description));
        }
        if self.company_days.iter().any(|d| d == date_key) {
            let description = self
                .company_descriptions
                .get(date_key)
                .map_or("", String::as_str);
            return Some((TeamDayKind::CompanyDay, description));
        }
        None
    }

    /// Finds an enriched sprint by id.
    pub fn sprint(&self, sprint_id: &str) -> Option<&EnrichedSprint> {
        self.sprints.iter().find(|s| s.id == sprint_id)
    }
}
