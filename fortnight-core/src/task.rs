//! Task model for the two-week planner.
//!
//! A task carries what the user typed in (name, group, hours, difficulty,
//! deadline) plus two derived fields that are only meaningful relative to a
//! "now". Derived fields are never persisted; `refresh_derived` rebuilds them
//! before every ranking/scheduling pass.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::{format_deadline, human_time_left, parse_deadline};

/// Construction-time validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task name must be non-empty")]
    EmptyName,

    #[error("task group must be non-empty")]
    EmptyGroup,

    #[error("{field} must be a non-negative integer, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("time commitment must be at least 1 hour")]
    NonPositiveCommitment,

    #[error("invalid deadline '{value}' (expected YYYY-MM-DD HH:MM)")]
    InvalidDeadline { value: String },
}

/// Task category. Lower priority class is scheduled first.
///
/// Anything other than school/work/extra is kept verbatim in `Other` and
/// scored like `Extra`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Group {
    School,
    Work,
    Extra,
    Other(String),
}

impl Group {
    /// Match raw input case-insensitively. Unknown labels keep their
    /// trimmed spelling.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "" => Err(ValidationError::EmptyGroup),
            "school" => Ok(Group::School),
            "work" => Ok(Group::Work),
            "extra" => Ok(Group::Extra),
            _ => Ok(Group::Other(trimmed.to_string())),
        }
    }

    pub fn priority_class(&self) -> u8 {
        match self {
            Group::School => 0,
            Group::Work => 1,
            _ => 2,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Group::School => "school",
            Group::Work => "work",
            Group::Extra => "extra",
            Group::Other(s) => s,
        }
    }
}

impl TryFrom<String> for Group {
    type Error = ValidationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Group::parse(&raw)
    }
}

impl From<Group> for String {
    fn from(group: Group) -> Self {
        group.as_str().to_string()
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of committed work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub name: String,
    pub group: Group,

    /// Whole hours required in total (> 0).
    pub time_commitment: u32,

    /// Subjective effort rating, no upper bound.
    pub difficulty: u32,

    /// Naive local timestamp, minute precision.
    pub deadline: NaiveDateTime,

    /// Derived from `group`; see `refresh_derived`.
    pub priority_class: u8,

    /// Derived: `deadline - now`, negative when overdue.
    pub seconds_to_deadline: i64,
}

impl Task {
    /// Build a task from typed values.
    ///
    /// `seconds_to_deadline` stays 0 until the first `refresh_derived`.
    pub fn new(
        name: impl Into<String>,
        group: Group,
        time_commitment: u32,
        difficulty: u32,
        deadline: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if time_commitment == 0 {
            return Err(ValidationError::NonPositiveCommitment);
        }
        let priority_class = group.priority_class();
        Ok(Self {
            name,
            group,
            time_commitment,
            difficulty,
            deadline,
            priority_class,
            seconds_to_deadline: 0,
        })
    }

    /// Build a task from raw text fields (user input or a stored record).
    pub fn from_raw(
        name: &str,
        group: &str,
        time_commitment: &str,
        difficulty: &str,
        deadline: &str,
    ) -> Result<Self, ValidationError> {
        let group = Group::parse(group)?;
        let time_commitment = parse_count("time commitment", time_commitment)?;
        let difficulty = parse_count("difficulty", difficulty)?;
        let deadline = parse_deadline(deadline)?;
        Self::new(name, group, time_commitment, difficulty, deadline)
    }

    /// Recompute `priority_class` and `seconds_to_deadline` against `now`.
    pub fn refresh_derived(&mut self, now: NaiveDateTime) {
        self.priority_class = self.group.priority_class();
        self.seconds_to_deadline = (self.deadline - now).num_seconds();
    }

    /// Whether this task must be placed whole on a single day.
    pub fn is_short(&self, short_task_max_hours: u32) -> bool {
        self.time_commitment <= short_task_max_hours
    }

    pub fn human_time_left(&self, now: NaiveDateTime) -> String {
        human_time_left(self.deadline, now)
    }

    /// Deadline rendered in the record format.
    pub fn deadline_text(&self) -> String {
        format_deadline(self.deadline)
    }
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, ValidationError> {
    let v = value.trim();
    if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        });
    }
    v.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
