//! The enrichment pipeline.
//!
//! Turns raw PIs plus the configuration bag into fully-computed
//! [`EnrichedPi`] records. Defaults are resolved once up front by
//! [`ResolvedConfig::resolve`]; every step after that is a plain lookup.
//! The input slice is never modified.

use tracing::{debug, warn};

use super::calendar::{DayInfo, business_days};
use super::capacity::{CapacityInput, calculate_sprint_capacity};
use super::totals::{total_capacity, total_sprint_velocity};
use super::validation::{ValidationLimits, is_valid_sprint_dates};
use crate::config::{ConfigBag, MemberAbsences, ResolvedConfig};
use crate::models::{
    EnrichedAssignment, EnrichedPi, EnrichedSprint, MemberAssignment, ProgramIncrement, Sprint,
};

/// Enriches every PI using the default validation limits.
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
/// let sprint = &enriched[0].sprints[0];
/// assert_eq!(sprint.weekdays.len(), 5);
/// assert_eq!(sprint.team[0].assignment.derived.capacity, 31);
/// assert_eq!(sprint.total_capacity, 5);
/// ```
pub fn enrich_pis(pis: &[ProgramIncrement], config: &ConfigBag) -> Vec<EnrichedPi> {
    enrich_pis_with_limits(pis, config, &ValidationLimits::default())
}

/// Enriches every PI, flagging sprints against the given limits.
pub fn enrich_pis_with_limits(
    pis: &[ProgramIncrement],
    config: &ConfigBag,
    limits: &ValidationLimits,
) -> Vec<EnrichedPi> {
    let resolved = ResolvedConfig::resolve(config);
    pis.iter()
        .map(|pi| enrich_pi(pi, &resolved, limits))
        .collect()
}

fn enrich_pi(
    pi: &ProgramIncrement,
    resolved: &ResolvedConfig,
    limits: &ValidationLimits,
) -> EnrichedPi {
    EnrichedPi {
        id: pi.id.clone(),
        name: pi.name.clone(),
        start: pi.start.clone(),
        end: pi.end.clone(),
        holidays: resolved.holidays.clone(),
        holiday_descriptions: resolved.holiday_descriptions.clone(),
        company_days: resolved.company_days.clone(),
        company_descriptions: resolved.company_descriptions.clone(),
        sprints: pi
            .sprints
            .iter()
            .map(|sprint| enrich_sprint(pi, sprint, resolved, limits))
            .collect(),
    }
}

fn enrich_sprint(
    pi: &ProgramIncrement,
    sprint: &Sprint,
    resolved: &ResolvedConfig,
    limits: &ValidationLimits,
) -> EnrichedSprint {
    let weekdays = business_days(&sprint.start, &sprint.end);
    if weekdays.is_empty() {
        warn!(
            pi_id = %pi.id,
            sprint_id = %sprint.id,
            start = %sprint.start,
            end = %sprint.end,
            "Sprint has no usable business days, capacity will be zero or negative"
        );
    }

    let team_days_out = weekdays
        .iter()
        .filter_map(DayInfo::to_date)
        .filter(|d| resolved.is_team_day_out(*d))
        .count() as i64;

    let dates_valid = is_valid_sprint_dates(
        &sprint.start,
        &sprint.end,
        &pi.start,
        &pi.end,
        limits.max_sprint_days,
    );

    let team: Vec<EnrichedAssignment> = sprint
        .team
        .iter()
        .map(|row| enrich_assignment(row, &weekdays, team_days_out, resolved))
        .collect();

    let directory = resolved.directory();
    let total_sprint_velocity = total_sprint_velocity(&team, directory);
    let total_capacity = total_capacity(&team, directory);

    debug!(
        pi_id = %pi.id,
        sprint_id = %sprint.id,
        business_days = weekdays.len(),
        team_days_out,
        members = team.len(),
        total_capacity,
        total_sprint_velocity,
        "Enriched sprint"
    );

    EnrichedSprint {
        id: sprint.id.clone(),
        name: sprint.name.clone(),
        start: sprint.start.clone(),
        end: sprint.end.clone(),
        weekdays,
        team_days_out,
        dates_valid,
        team,
        total_sprint_velocity,
        total_capacity,
    }
}

fn enrich_assignment(
    row: &MemberAssignment,
    weekdays: &[DayInfo],
    team_days_out: i64,
    resolved: &ResolvedConfig,
) -> EnrichedAssignment {
    let empty = MemberAbsences::default();
    let absences = resolved.absences(&row.member_id).unwrap_or(&empty);

    let derived = calculate_sprint_capacity(&CapacityInput {
        weekdays,
        pto_dates: &absences.pto,
        loa_dates: &absences.loa,
        other_dates: &absences.other,
        team_days_out,
        offset: resolved.offset(&row.member_id),
    });

    let directory = resolved.directory();
    EnrichedAssignment {
        assignment: MemberAssignment {
            derived,
            ..row.clone()
        },
        member_name: directory.name(&row.member_id).map(str::to_string),
        include_in_calc: directory.includes(&row.member_id),
        pto_dates: absences.pto.clone(),
        loa_dates: absences.loa.clone(),
        other_dates: absences.other.clone(),
        other_comments: absences.other_comments.clone(),
    }
}
