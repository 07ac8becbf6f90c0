//! Scheduling diagnostics.
//!
//! The allocator never fails; anything it could not do is reported as one of
//! these events. Rendering them for a terminal (or shipping them as JSON) is
//! the caller's job.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::format_deadline;

/// `task` and `by` are positions in the ranked task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleDiagnostic {
    /// Deadline falls today or earlier, so there is no working day left.
    NoDaysBeforeDeadline {
        task: usize,
        name: String,
        deadline: NaiveDateTime,
    },
    /// A short task found no single day with room, even after eviction.
    NoRoomForShortTask {
        task: usize,
        name: String,
        hours: u32,
    },
    /// A long task ran out of days; already placed hours stay placed.
    PartiallyScheduled {
        task: usize,
        name: String,
        unmet_hours: u32,
    },
    /// A placement was removed to make room for a higher-priority task.
    Evicted {
        task: usize,
        name: String,
        date: NaiveDate,
        hours: u32,
        by: usize,
    },
}

impl ScheduleDiagnostic {
    /// Ranked position of the task this event is about.
    pub fn task(&self) -> usize {
        match self {
            Self::NoDaysBeforeDeadline { task, .. }
            | Self::NoRoomForShortTask { task, .. }
            | Self::PartiallyScheduled { task, .. }
            | Self::Evicted { task, .. } => *task,
        }
    }
}

impl fmt::Display for ScheduleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDaysBeforeDeadline { name, deadline, .. } => write!(
                f,
                "Task '{name}' cannot be scheduled as there are no days left before the deadline ({}).",
                format_deadline(*deadline)
            ),
            Self::NoRoomForShortTask { name, hours, .. } => write!(
                f,
                "Cannot schedule task '{name}' ({hours}h) even after removing lower-priority tasks."
            ),
            Self::PartiallyScheduled {
                name, unmet_hours, ..
            } => write!(
                f,
                "Cannot fully schedule task '{name}' even after removing lower-priority tasks. Remaining time: {unmet_hours}h"
            ),
            Self::Evicted {
                name, date, hours, ..
            } => write!(
                f,
                "Removed {hours}h of '{name}' from {} to make room for a higher-priority task.",
                date.format("%Y-%m-%d")
            ),
        }
    }
}
