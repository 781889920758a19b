//! Date-range validation for PIs and sprints.
//!
//! The boolean checks back display warnings; [`validate_pis`] turns the same
//! rules into typed errors for the write path, where invalid edits are
//! rejected before they reach storage.

use serde::{Deserialize, Serialize};

use super::calendar::parse_iso_date;
use crate::error::{PlannerError, PlannerResult};
use crate::models::ProgramIncrement;

/// Longest PI, in days between start and end.
pub const DEFAULT_MAX_PI_DAYS: i64 = 365;

/// Longest sprint, in days between start and end.
pub const DEFAULT_MAX_SPRINT_DAYS: i64 = 90;

/// Upper bounds applied by the validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// See [`DEFAULT_MAX_PI_DAYS`].
    pub max_pi_days: i64,
    /// See [`DEFAULT_MAX_SPRINT_DAYS`].
    pub max_sprint_days: i64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_pi_days: DEFAULT_MAX_PI_DAYS,
            max_sprint_days: DEFAULT_MAX_SPRINT_DAYS,
        }
    }
}

/// Checks that both dates parse, `start <= end`, and the span is at most `max_days`.
///
/// # Example
///
/// ```
/// use capacity_planner::calculation::is_valid_date_range;
///
/// assert!(is_valid_date_range("2024-01-01", "2024-03-29", 365));
/// assert!(!is_valid_date_range("2024-03-29", "2024-01-01", 365));
/// assert!(!is_valid_date_range("2024-01-01", "2025-06-01", 365));
/// ```
pub fn is_valid_date_range(start: &str, end: &str, max_days: i64) -> bool {
    let (Some(start), Some(end)) = (parse_iso_date(start), parse_iso_date(end)) else {
        return false;
    };
    let days = (end - start).num_days();
    (0..=max_days).contains(&days)
}

/// Checks a sprint's own range and that it sits inside its PI (inclusive).
///
/// Unparseable PI dates fail the check.
pub fn is_valid_sprint_dates(
    sprint_start: &str,
    sprint_end: &str,
    pi_start: &str,
    pi_end: &str,
    max_sprint_days: i64,
) -> bool {
    sprint_date_problem(sprint_start, sprint_end, pi_start, pi_end, max_sprint_days).is_none()
}

fn sprint_date_problem(
    sprint_start: &str,
    sprint_end: &str,
    pi_start: &str,
    pi_end: &str,
    max_sprint_days: i64,
) -> Option<String> {
    let (Some(start), Some(end)) = (parse_iso_date(sprint_start), parse_iso_date(sprint_end))
    else {
        return Some("sprint dates must be yyyy-mm-dd".to_string());
    };
    if end < start {
        return Some("sprint ends before it starts".to_string());
    }
    let days = (end - start).num_days();
    if days > max_sprint_days {
        return Some(format!(
            "sprint spans {} days, limit is {}",
            days, max_sprint_days
        ));
    }
    let (Some(pi_start), Some(pi_end)) = (parse_iso_date(pi_start), parse_iso_date(pi_end)) else {
        return Some("PI dates must be yyyy-mm-dd".to_string());
    };
    if start < pi_start {
        return Some(format!("sprint starts before PI start {}", pi_start));
    }
    if end > pi_end {
        return Some(format!("sprint ends after PI end {}", pi_end));
    }
    None
}

/// Validates every PI and sprint, returning the first problem found.
pub fn validate_pis(pis: &[ProgramIncrement], limits: &ValidationLimits) -> PlannerResult<()> {
    for pi in pis {
        if !is_valid_date_range(&pi.start, &pi.end, limits.max_pi_days) {
            return Err(PlannerError::InvalidDateRange {
                pi_id: pi.id.clone(),
                start: pi.start.clone(),
                end: pi.end.clone(),
            });
        }
        for sprint in &pi.sprints {
            if let Some(message) = sprint_date_problem(
                &sprint.start,
                &sprint.end,
                &pi.start,
                &pi.end,
                limits.max_sprint_days,
            ) {
                return Err(PlannerError::InvalidSprintDates {
                    pi_id: pi.id.clone(),
                    sprint_id: sprint.id.clone(),
                    message,
                });
            }
        }
    }
    Ok(())
}
