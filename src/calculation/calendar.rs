//! Calendar expansion for sprint date columns.
//!
//! All date handling is timezone-naive calendar-day arithmetic on
//! [`NaiveDate`], so a sprint boundary can never shift by a day.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The storage format for all dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// One calendar day of a sprint, as shown in a column header.
///
/// # Example
///
/// ```
/// use capacity_planner::calculation::DayInfo;
/// use chrono::NaiveDate;
///
/// let day = DayInfo::from_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
/// assert_eq!(day.key, "2024-01-03");
/// assert_eq!(day.label, "Wed");
/// assert_eq!(day.date, "1/3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayInfo {
    /// ISO key (`yyyy-mm-dd`).
    pub key: String,
    /// Three-letter weekday label.
    pub label: String,
    /// Short `M/d` date.
    pub date: String,
}

impl DayInfo {
    /// Builds the column entry for a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            key: date.format(ISO_DATE_FORMAT).to_string(),
            label: date.format("%a").to_string(),
            date: date.format("%-m/%-d").to_string(),
        }
    }

    /// Parses this entry's key back into a date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.key)
    }

    /// Returns `true` if the key parses and falls on Monday through Friday.
    pub fn is_business_day(&self) -> bool {
        self.to_date().is_some_and(|d| !is_weekend(d))
    }
}

/// Parses a `yyyy-mm-dd` date, returning `None` for anything else.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Returns `true` for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Expands an inclusive date range into one [`DayInfo`] per day.
///
/// Weekends are dropped unless `include_weekends` is set. If either date
/// fails to parse, or `end` is before `start`, the result is empty: callers
/// must read that as "cannot render columns", not as a zero-day range.
///
/// # Example
///
/// ```
/// use capacity_planner::calculation::expand_date_range;
///
/// // Monday through Sunday
/// assert_eq!(expand_date_range("2024-01-01", "2024-01-07", true).len(), 7);
/// assert_eq!(expand_date_range("2024-01-01", "2024-01-07", false).len(), 5);
/// assert!(expand_date_range("2024-01-07", "2024-01-01", true).is_empty());
/// assert!(expand_date_range("not-a-date", "2024-01-01", true).is_empty());
/// ```
pub fn expand_date_range(start: &str, end: &str, include_weekends: bool) -> Vec<DayInfo> {
    let (Some(start), Some(end)) = (parse_iso_date(start), parse_iso_date(end)) else {
        return Vec::new();
    };
    if end < start {
        return Vec::new();
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| include_weekends || !is_weekend(*day))
        .map(DayInfo::from_date)
        .collect()
}

/// Shorthand for the business days of a range.
pub fn business_days(start: &str, end: &str) -> Vec<DayInfo> {
    expand_date_range(start, end, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(days: &[DayInfo]) -> Vec<&str> {
        days.iter().map(|d| d.key.as_str()).collect()
    }

    #[test]
    fn test_single_day_range() {
        let days = expand_date_range("2024-01-03", "2024-01-03", true);
        assert_eq!(keys(&days), vec!["2024-01-03"]);
        assert_eq!(days[0].label, "Wed");
    }

    #[test]
    fn test_full_week_with_weekends() {
        let days = expand_date_range("2024-01-01", "2024-01-07", true);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].label, "Mon");
        assert_eq!(days[5].label, "Sat");
        assert_eq!(days[6].label, "Sun");
    }

    /// Scenario C: a Monday-to-Sunday sprint has five business days.
    #[test]
    fn test_weekend_excluded_when_flag_false() {
        let days = expand_date_range("2024-01-01", "2024-01-07", false);
        assert_eq!(
            keys(&days),
            vec![
                "2024-01-01",
                "2024-01-02",
                "2024-01-03",
                "2024-01-04",
                "2024-01-05"
            ]
        );
    }

    #[test]
    fn test_weekend_only_range_has_no_business_days() {
        assert!(business_days("2024-01-06", "2024-01-07").is_empty());
    }

    #[test]
    fn test_crosses_month_and_leap_day() {
        let days = expand_date_range("2024-02-28", "2024-03-01", true);
        assert_eq!(keys(&days), vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
        assert_eq!(days[1].date, "2/29");
        assert_eq!(days[2].date, "3/1");
    }

    #[test]
    fn test_crosses_year_boundary() {
        let days = expand_date_range("2024-12-30", "2025-01-02", true);
        assert_eq!(days.len(), 4);
        assert_eq!(days[2].key, "2025-01-01");
    }

    #[test]
    fn test_end_before_start_is_empty() {
        assert!(expand_date_range("2024-01-05", "2024-01-01", true).is_empty());
    }

    #[test]
    fn test_malformed_dates_are_empty() {
        assert!(expand_date_range("", "2024-01-05", true).is_empty());
        assert!(expand_date_range("2024-01-01", "2024-02-30", true).is_empty());
        assert!(expand_date_range("01/01/2024", "2024-01-05", true).is_empty());
    }

    #[test]
    fn test_parse_iso_date_trims_whitespace() {
        assert_eq!(
            parse_iso_date(" 2024-01-01 "),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(parse_iso_date("2024-13-01"), None);
    }

    #[test]
    fn test_day_info_business_day_detection() {
        let saturday = DayInfo::from_date(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
        let monday = DayInfo::from_date(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert!(!saturday.is_business_day());
        assert!(monday.is_business_day());

        let broken = DayInfo {
            key: "garbage".to_string(),
            label: "Mon".to_string(),
            date: "1/1".to_string(),
        };
        assert!(!broken.is_business_day());
    }
}
