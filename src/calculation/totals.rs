//! Sprint-level headline figures.
//!
//! Only members whose directory entry has `include_in_calc` set count toward
//! these totals. Members missing from the directory are included.

use rust_decimal::Decimal;

use super::capacity::hours_to_days;
use crate::models::{MemberAssignment, MemberDirectory};

fn included<'a, T: AsRef<MemberAssignment>>(
    team: &'a [T],
    directory: &'a MemberDirectory,
) -> impl Iterator<Item = &'a MemberAssignment> {
    team.iter()
        .map(AsRef::as_ref)
        .filter(move |row| directory.includes(&row.member_id))
}

/// Sums included members' capacity hours and converts the total back into days.
///
/// # Example
///
/// ```
/// use capacity_planner::calculation::total_capacity;
/// use capacity_planner::models::{Member, MemberAssignment, MemberDirectory};
///
/// let mut a = MemberAssignment::for_member("a");
/// a.derived.capacity = 10;
/// let mut b = MemberAssignment::for_member("b");
/// b.derived.capacity = 20;
///
/// let mut excluded = Member::new("A");
/// excluded.id = "a".to_string();
/// excluded.include_in_calc = false;
/// let directory = MemberDirectory::new(&[excluded]);
///
/// // 20 / 6.2 = 3.23
/// assert_eq!(total_capacity(&[a, b], &directory), 3);
/// ```
pub fn total_capacity<T: AsRef<MemberAssignment>>(team: &[T], directory: &MemberDirectory) -> i64 {
    let hours: Decimal = included(team, directory)
        .map(|row| Decimal::from(row.derived.capacity))
        .fold(Decimal::ZERO, Decimal::saturating_add);
    hours_to_days(hours)
}

/// Sums included members' `p2h`, saturating at the `i64` bounds.
pub fn total_sprint_velocity<T: AsRef<MemberAssignment>>(
    team: &[T],
    directory: &MemberDirectory,
) -> i64 {
    included(team, directory)
        .map(|row| row.derived.p2h)
        .fold(0, i64::saturating_add)
}
