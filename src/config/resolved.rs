//! The resolve-defaults step run before any capacity calculation.
//!
//! [`ResolvedConfig`] turns the flat configuration lists into the lookups
//! the enrichment pipeline needs. Every fallback (missing category, unknown
//! member, absent adjustment, blank member id) is decided here and nowhere
//! else.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::types::ConfigBag;
use crate::calculation::parse_iso_date;
use crate::models::{LeaveKind, LeaveRecord, MemberDirectory};

/// One member's absence dates, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberAbsences {
    /// PTO dates, in record order.
    pub pto: Vec<String>,
    /// LOA dates, in record order.
    pub loa: Vec<String>,
    /// Other absence dates, in record order.
    pub other: Vec<String>,
    /// Comments on Other absences, keyed by date.
    pub other_comments: BTreeMap<String, String>,
}

impl MemberAbsences {
    /// Returns the dates of one kind.
    pub fn dates(&self, kind: LeaveKind) -> &[String] {
        match kind {
            LeaveKind::Pto => &self.pto,
            LeaveKind::Loa => &self.loa,
            LeaveKind::Other => &self.other,
        }
    }

    fn push(&mut self, kind: LeaveKind, record: &LeaveRecord) {
        match kind {
            LeaveKind::Pto => self.pto.push(record.date.clone()),
            LeaveKind::Loa => self.loa.push(record.date.clone()),
            LeaveKind::Other => {
                self.other.push(record.date.clone());
                if let Some(comments) = record.comments.as_ref().filter(|c| !c.is_empty()) {
                    self.other_comments
                        .insert(record.date.clone(), comments.clone());
                }
            }
        }
    }
}

/// Fully-populated lookups derived from a [`ConfigBag`].
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Holiday dates, in record order.
    pub holidays: Vec<String>,
    /// Holiday descriptions by date; later records win.
    pub holiday_descriptions: BTreeMap<String, String>,
    /// Company day dates, in record order.
    pub company_days: Vec<String>,
    /// Company day descriptions by date; later records win.
    pub company_descriptions: BTreeMap<String, String>,
    team_days_out: HashSet<NaiveDate>,
    absences: HashMap<String, MemberAbsences>,
    offsets: HashMap<String, Decimal>,
    directory: MemberDirectory,
}

impl ResolvedConfig {
    /// Builds every lookup from the configuration bag.
    pub fn resolve(config: &ConfigBag) -> Self {
        let mut resolved = Self {
            directory: MemberDirectory::new(&config.members),
            ..Self::default()
        };

        for holiday in &config.holidays {
            resolved.holidays.push(holiday.date.clone());
            resolved
                .holiday_descriptions
                .insert(holiday.date.clone(), holiday.description.clone());
        }
        for day in &config.company_days {
            resolved.company_days.push(day.date.clone());
            resolved
                .company_descriptions
                .insert(day.date.clone(), day.description.clone());
        }
        resolved.team_days_out = resolved
            .holidays
            .iter()
            .chain(&resolved.company_days)
            .filter_map(|d| parse_iso_date(d))
            .collect();

        for kind in [LeaveKind::Pto, LeaveKind::Loa, LeaveKind::Other] {
            for record in config.leave(kind) {
                let member_id = record.member_id.trim();
                if member_id.is_empty() {
                    continue;
                }
                resolved
                    .absences
                    .entry(member_id.to_string())
                    .or_default()
                    .push(kind, record);
            }
        }

        for adjustment in &config.adjustments {
            let member_id = adjustment.member_id.trim();
            if member_id.is_empty() {
                continue;
            }
            resolved
                .offsets
                .entry(member_id.to_string())
                .or_insert(adjustment.offset);
        }

        resolved
    }

    /// Returns `true` if the date is a holiday or company day.
    pub fn is_team_day_out(&self, date: NaiveDate) -> bool {
        self.team_days_out.contains(&date)
    }

    /// The member's absences; `None` for unknown or blank ids.
    pub fn absences(&self, member_id: &str) -> Option<&MemberAbsences> {
        self.absences.get(member_id.trim())
    }

    /// The member's capacity offset. The first matching adjustment wins; none means zero.
    pub fn offset(&self, member_id: &str) -> Decimal {
        self.offsets
            .get(member_id.trim())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// The member directory index.
    pub fn directory(&self) -> &MemberDirectory {
        &self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Adjustment, CompanyDay, Holiday, Member};

    fn leave(member_id: &str, date: &str) -> LeaveRecord {
        LeaveRecord {
            member_id: member_id.to_string(),
            date: date.to_string(),
            comments: None,
        }
    }

    fn adjustment(member_id: &str, offset: i64) -> Adjustment {
        Adjustment {
            member_id: member_id.to_string(),
            date: "2024-01-01".to_string(),
            reason: "test".to_string(),
            offset: Decimal::from(offset),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_bag_resolves_to_empty_lookups() {
        let resolved = ResolvedConfig::resolve(&ConfigBag::default());
        assert!(resolved.holidays.is_empty());
        assert!(resolved.absences("m1").is_none());
        assert_eq!(resolved.offset("m1"), Decimal::ZERO);
        assert!(resolved.directory().includes("m1"));
    }

    #[test]
    fn test_absences_are_split_by_member_and_kind() {
        let config = ConfigBag {
            pto: vec![leave("m1", "2024-01-02"), leave("m2", "2024-01-03")],
            loa: vec![leave("m1", "2024-01-04")],
            other: vec![LeaveRecord {
                member_id: "m1".to_string(),
                date: "2024-01-05".to_string(),
                comments: Some("conference".to_string()),
            }],
            ..ConfigBag::default()
        };
        let resolved = ResolvedConfig::resolve(&config);

        let m1 = resolved.absences("m1").unwrap();
        assert_eq!(m1.pto, vec!["2024-01-02"]);
        assert_eq!(m1.loa, vec!["2024-01-04"]);
        assert_eq!(m1.dates(LeaveKind::Other), ["2024-01-05".to_string()]);
        assert_eq!(m1.other_comments["2024-01-05"], "conference");

        let m2 = resolved.absences("m2").unwrap();
        assert_eq!(m2.pto, vec!["2024-01-03"]);
        assert!(m2.loa.is_empty());
    }

    #[test]
    fn test_blank_member_ids_never_match() {
        let config = ConfigBag {
            pto: vec![leave("", "2024-01-02"), leave("  ", "2024-01-03")],
            adjustments: vec![adjustment("", 10)],
            ..ConfigBag::default()
        };
        let resolved = ResolvedConfig::resolve(&config);
        assert!(resolved.absences("").is_none());
        assert_eq!(resolved.offset(""), Decimal::ZERO);
    }

    #[test]
    fn test_first_adjustment_wins() {
        let config = ConfigBag {
            adjustments: vec![adjustment("m1", 4), adjustment("m1", -8)],
            ..ConfigBag::default()
        };
        let resolved = ResolvedConfig::resolve(&config);
        assert_eq!(resolved.offset("m1"), Decimal::from(4));
    }

    #[test]
    fn test_team_days_out_cover_holidays_and_company_days() {
        let config = ConfigBag {
            holidays: vec![Holiday {
                date: "2024-01-01".to_string(),
                description: "New Year".to_string(),
            }],
            company_days: vec![
                CompanyDay {
                    date: "2024-01-02".to_string(),
                    description: "Recharge".to_string(),
                },
                CompanyDay {
                    date: "bad".to_string(),
                    description: "Typo".to_string(),
                },
            ],
            ..ConfigBag::default()
        };
        let resolved = ResolvedConfig::resolve(&config);

        assert!(resolved.is_team_day_out(date("2024-01-01")));
        assert!(resolved.is_team_day_out(date("2024-01-02")));
        assert!(!resolved.is_team_day_out(date("2024-01-03")));
        assert_eq!(resolved.company_days, vec!["2024-01-02", "bad"]);
        assert_eq!(resolved.holiday_descriptions["2024-01-01"], "New Year");
    }

    #[test]
    fn test_duplicate_holiday_descriptions_last_wins() {
        let config = ConfigBag {
            holidays: vec![
                Holiday {
                    date: "2024-12-25".to_string(),
                    description: "Xmas".to_string(),
                },
                Holiday {
                    date: "2024-12-25".to_string(),
                    description: "Christmas Day".to_string(),
                },
            ],
            ..ConfigBag::default()
        };
        let resolved = ResolvedConfig::resolve(&config);
        assert_eq!(resolved.holiday_descriptions["2024-12-25"], "Christmas Day");
    }

    #[test]
    fn test_directory_flags_are_resolved() {
        let config = ConfigBag {
            members: vec![Member {
                id: "m1".to_string(),
                name: "Ana".to_string(),
                include_in_calc: false,
            }],
            ..ConfigBag::default()
        };
        let resolved = ResolvedConfig::resolve(&config);
        assert!(!resolved.directory().includes("m1"));
        assert!(resolved.directory().includes("m2"));
    }
}
