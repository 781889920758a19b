//! Member directory models.
//!
//! Members live in a directory owned by the configuration store. Sprint
//! teams only reference them by id, so directory edits are always reflected
//! in every assignment without copying.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

fn default_include_in_calc() -> bool {
    true
}

/// A directory entry for a team member.
///
/// # Example
///
/// ```
/// use capacity_planner::models::Member;
///
/// let member: Member = serde_json::from_str(r#"{"id": "m1", "name": "Ana"}"#).unwrap();
/// assert!(member.include_in_calc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique identifier for the member.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether the member's numbers count toward sprint totals.
    #[serde(default = "default_include_in_calc")]
    pub include_in_calc: bool,
}

impl Member {
    /// Creates a member with a fresh id who counts toward totals.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            include_in_calc: true,
        }
    }
}

/// Id-indexed view over the member directory.
///
/// Lookups for unknown ids fall back to "included, no name". When the
/// directory holds duplicate ids the first entry wins.
#[derive(Debug, Clone, Default)]
pub struct MemberDirectory {
    members: HashMap<String, Member>,
}

impl MemberDirectory {
    /// Builds the index from a directory listing.
    pub fn new(members: &[Member]) -> Self {
        let mut index = HashMap::with_capacity(members.len());
        for member in members {
            index
                .entry(member.id.clone())
                .or_insert_with(|| member.clone());
        }
        Self { members: index }
    }

    /// Looks up a member by id.
    pub fn get(&self, member_id: &str) -> Option<&Member> {
        self.members.get(member_id)
    }

    /// Returns the member's `include_in_calc` flag, defaulting to `true`.
    pub fn includes(&self, member_id: &str) -> bool {
        self.get(member_id).is_none_or(|m| m.include_in_calc)
    }

    /// Returns the member's display name, if the id is known.
    pub fn name(&self, member_id: &str) -> Option<&str> {
        self.get(member_id).map(|m| m.name.as_str())
    }

    /// Returns the number of distinct members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
