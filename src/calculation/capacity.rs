//! Per-member sprint capacity.
//!
//! Turns a sprint's days, a member's absence dates, the team-wide days out
//! and a per-member hour offset into availability and velocity figures.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;
use tracing::warn;

use super::calendar::{DayInfo, is_weekend, parse_iso_date};
use crate::models::CapacityResult;

/// Working hours in one business day.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(62, 0, 0, false, 1);

/// Inputs to [`calculate_sprint_capacity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityInput<'a> {
    /// Sprint days; weekend entries are ignored.
    pub weekdays: &'a [DayInfo],
    /// The member's PTO dates.
    pub pto_dates: &'a [String],
    /// The member's LOA dates.
    pub loa_dates: &'a [String],
    /// The member's Other absence dates.
    pub other_dates: &'a [String],
    /// Business days lost to holidays and company days.
    pub team_days_out: i64,
    /// Hours added to the member's capacity before rounding.
    pub offset: Decimal,
}

/// Rounds to the nearest whole number, halves away from zero.
///
/// Values outside the `i64` range saturate to `i64::MIN` or `i64::MAX`.
pub fn round_to_whole(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(if value.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
}

/// Converts whole hours back into days at [`HOURS_PER_DAY`].
pub fn hours_to_days(hours: Decimal) -> i64 {
    round_to_whole(hours / HOURS_PER_DAY)
}

/// Calculates one member's capacity for a sprint.
///
/// - Weekend entries and entries whose key does not parse are dropped.
/// - A business day counts once toward `individual_days_out` even if it
///   appears in several absence lists.
/// - `individual_days_avail` is not clamped and goes negative when days out
///   exceed the sprint's business days.
/// - `capacity` is `individual_days_avail * 6.2 + offset`, rounded. An
///   offset too large to represent saturates instead of overflowing.
/// - `estimated_velocity` (and `p2h`) is `capacity / 6.2`, rounded.
///
/// Malformed absence dates never match and never fail.
///
/// # Example
///
/// ```
/// use capacity_planner::calculation::{
///     CapacityInput, calculate_sprint_capacity, expand_date_range,
/// };
///
/// let weekdays = expand_date_range("2024-01-01", "2024-01-05", false);
/// let pto = vec!["2024-01-03".to_string()];
/// let result = calculate_sprint_capacity(&CapacityInput {
///     weekdays: &weekdays,
///     pto_dates: &pto,
///     ..CapacityInput::default()
/// });
/// assert_eq!(result.individual_days_out, 1);
/// assert_eq!(result.individual_days_avail, 4);
/// assert_eq!(result.capacity, 25);
/// assert_eq!(result.estimated_velocity, 4);
/// ```
pub fn calculate_sprint_capacity(input: &CapacityInput<'_>) -> CapacityResult {
    let business_days: Vec<NaiveDate> = input
        .weekdays
        .iter()
        .filter_map(DayInfo::to_date)
        .filter(|d| !is_weekend(*d))
        .collect();

    let absent: HashSet<NaiveDate> = input
        .pto_dates
        .iter()
        .chain(input.loa_dates)
        .chain(input.other_dates)
        .filter_map(|d| parse_iso_date(d))
        .collect();

    let individual_days_out = business_days.iter().filter(|d| absent.contains(d)).count() as i64;
    let individual_days_avail =
        business_days.len() as i64 - input.team_days_out - individual_days_out;

    let hours =
        (Decimal::from(individual_days_avail) * HOURS_PER_DAY).saturating_add(input.offset);
    let capacity = round_to_whole(hours);
    if capacity == i64::MAX || capacity == i64::MIN {
        warn!(offset = %input.offset, capacity, "Capacity saturated");
    }
    let estimated_velocity = hours_to_days(Decimal::from(capacity));

    CapacityResult {
        team_days_out: input.team_days_out,
        individual_days_out,
        individual_days_avail,
        capacity,
        estimated_velocity,
        p2h: estimated_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calendar::expand_date_range;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn dates(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn week() -> Vec<DayInfo> {
        expand_date_range("2024-01-01", "2024-01-05", false)
    }

    #[test]
    fn test_hours_per_day_constant() {
        assert_eq!(HOURS_PER_DAY, dec("6.2"));
    }

    /// Scenario A: five clear business days.
    #[test]
    fn test_full_week_no_absences() {
        let weekdays = week();
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            ..CapacityInput::default()
        });

        assert_eq!(result.team_days_out, 0);
        assert_eq!(result.individual_days_out, 0);
        assert_eq!(result.individual_days_avail, 5);
        assert_eq!(result.capacity, 31);
        assert_eq!(result.estimated_velocity, 5);
        assert_eq!(result.p2h, 5);
    }

    /// Scenario B: one PTO day mid-week.
    #[test]
    fn test_one_pto_day() {
        let weekdays = week();
        let pto = dates(&["2024-01-03"]);
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            pto_dates: &pto,
            ..CapacityInput::default()
        });

        assert_eq!(result.individual_days_out, 1);
        assert_eq!(result.individual_days_avail, 4);
        assert_eq!(result.capacity, 25);
        assert_eq!(result.estimated_velocity, 4);
    }

    #[test]
    fn test_overlapping_absences_count_once() {
        let weekdays = week();
        let pto = dates(&["2024-01-02"]);
        let loa = dates(&["2024-01-02", "2024-01-04"]);
        let other = dates(&["2024-01-04"]);
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            pto_dates: &pto,
            loa_dates: &loa,
            other_dates: &other,
            ..CapacityInput::default()
        });

        assert_eq!(result.individual_days_out, 2);
        assert_eq!(result.individual_days_avail, 3);
    }

    #[test]
    fn test_absences_outside_sprint_or_on_weekends_are_ignored() {
        let weekdays = expand_date_range("2024-01-01", "2024-01-07", true);
        let pto = dates(&["2024-01-06", "2024-01-07", "2024-02-01"]);
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            pto_dates: &pto,
            ..CapacityInput::default()
        });

        assert_eq!(result.individual_days_out, 0);
        assert_eq!(result.individual_days_avail, 5);
    }

    #[test]
    fn test_weekend_days_never_count_even_if_passed_in() {
        let with_weekends = expand_date_range("2024-01-01", "2024-01-07", true);
        let without = expand_date_range("2024-01-01", "2024-01-07", false);

        let a = calculate_sprint_capacity(&CapacityInput {
            weekdays: &with_weekends,
            ..CapacityInput::default()
        });
        let b = calculate_sprint_capacity(&CapacityInput {
            weekdays: &without,
            ..CapacityInput::default()
        });
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_absence_dates_do_not_match() {
        let weekdays = week();
        let pto = dates(&["", "2024-1-32", "tomorrow"]);
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            pto_dates: &pto,
            ..CapacityInput::default()
        });
        assert_eq!(result.individual_days_out, 0);
    }

    #[test]
    fn test_team_days_out_reduce_availability() {
        let weekdays = week();
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            team_days_out: 1,
            ..CapacityInput::default()
        });

        assert_eq!(result.team_days_out, 1);
        assert_eq!(result.individual_days_avail, 4);
        assert_eq!(result.capacity, 25);
    }

    /// Scenario E: days out exceed business days; the figures go negative.
    #[test]
    fn test_negative_availability_is_not_clamped() {
        let weekdays = week();
        let pto = dates(&["2024-01-01", "2024-01-02", "2024-01-03"]);
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            pto_dates: &pto,
            team_days_out: 4,
            ..CapacityInput::default()
        });

        assert_eq!(result.individual_days_out, 3);
        assert_eq!(result.individual_days_avail, -2);
        // -2 * 6.2 = -12.4
        assert_eq!(result.capacity, -12);
        // -12 / 6.2 = -1.935...
        assert_eq!(result.estimated_velocity, -2);
    }

    #[test]
    fn test_offset_is_added_before_rounding() {
        let weekdays = week();
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            offset: dec("0.6"),
            ..CapacityInput::default()
        });

        // 31.0 + 0.6 = 31.6 -> 32
        assert_eq!(result.capacity, 32);
        // 32 / 6.2 = 5.16 -> 5
        assert_eq!(result.estimated_velocity, 5);
        // Adding the offset after rounding would have produced 31.6.
    }

    #[test]
    fn test_large_negative_offset_moves_velocity() {
        let weekdays = week();
        let result = calculate_sprint_capacity(&CapacityInput {
            weekdays: &weekdays,
            offset: dec("-12.4"),
            ..CapacityInput::default()
        });

        assert_eq!(result.individual_days_avail, 5);
        assert_eq!(result.capacity, 19);
        // 19 / 6.2 = 3.06 -> 3, no longer equal to days available.
        assert_eq!(result.estimated_velocity, 3);
    }

    #[test]
    fn test_empty_weekdays_yield_zero_capacity() {
        let result = calculate_sprint_capacity(&CapacityInput::default());
        assert_eq!(result, CapacityResult::default());
    }

    #[test]
    fn test_round_to_whole_halves_away_from_zero() {
        assert_eq!(round_to_whole(dec("2.5")), 3);
        assert_eq!(round_to_whole(dec("-2.5")), -3);
        assert_eq!(round_to_whole(dec("24.8")), 25);
        assert_eq!(round_to_whole(dec("-12.4")), -12);
    }

    #[test]
    fn test_hours_to_days() {
        assert_eq!(hours_to_days(dec("31")), 5);
        assert_eq!(hours_to_days(dec("25")), 4);
        assert_eq!(hours_to_days(dec("20")), 3);
    }

    #[test]
    fn test_round_to_whole_saturates_out_of_range() {
        assert_eq!(round_to_whole(dec("10000000000000000000000")), i64::MAX);
        assert_eq!(round_to_whole(dec("-10000000000000000000000")), i64::MIN);
        assert_eq!(round_to_whole(Decimal::MAX), i64::MAX);
    }

    #[test]
    fn test_huge_offsets_saturate_capacity() {
        let weekdays = week();

        for (offset, capacity) in [
            (Decimal::MAX, i64::MAX),
            (dec("10000000000000000000000"), i64::MAX),
            (Decimal::MIN, i64::MIN),
            (dec("-10000000000000000000000"), i64::MIN),
        ] {
            let result = calculate_sprint_capacity(&CapacityInput {
                weekdays: &weekdays,
                offset,
                ..CapacityInput::default()
            });
            assert_eq!(result.individual_days_avail, 5);
            assert_eq!(result.capacity, capacity);
            assert_eq!(result.estimated_velocity, hours_to_days(Decimal::from(capacity)));
            assert_eq!(result.p2h, result.estimated_velocity);
        }
    }
}
