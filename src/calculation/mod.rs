//! Calculation logic for capacity planning.
//!
//! This module contains the calendar expansion of sprint dates, per-member
//! capacity calculation, sprint totals, date-range validation and the
//! enrichment pipeline that ties them together.

mod calendar;
mod capacity;
mod enrichment;
mod totals;
mod validation;

pub use calendar::{
    DayInfo, ISO_DATE_FORMAT, business_days, expand_date_range, is_weekend, parse_iso_date,
};
pub use capacity::{
    CapacityInput, HOURS_PER_DAY, calculate_sprint_capacity, hours_to_days, round_to_whole,
};
pub use enrichment::{enrich_pis, enrich_pis_with_limits};
pub use totals::{total_capacity, total_sprint_velocity};
pub use validation::{
    DEFAULT_MAX_PI_DAYS, DEFAULT_MAX_SPRINT_DAYS, ValidationLimits, is_valid_date_range,
    is_valid_sprint_dates, validate_pis,
};
