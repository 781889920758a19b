//! Core data models for the capacity planner.
//!
//! This module contains the persisted records (PIs, sprints, team rows,
//! members, configuration records) and the enriched view models built from
//! them.

mod config_entry;
mod enriched;
pub(crate) mod lenient;
mod member;
mod program_increment;

pub use config_entry::{Adjustment, CompanyDay, Holiday, LeaveKind, LeaveRecord};
pub use enriched::{EnrichedAssignment, EnrichedPi, EnrichedSprint, TeamDayKind};
pub use member::{Member, MemberDirectory};
pub use program_increment::{CapacityResult, MemberAssignment, ProgramIncrement, Sprint};
