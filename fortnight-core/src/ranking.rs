//! Priority ranking: the total order that decides allocation priority.
//!
//! Order (each key breaks ties in the previous one):
//! 1. priority class ASC (school, work, everything else)
//! 2. seconds to deadline ASC (overdue first)
//! 3. time commitment DESC
//! 4. difficulty: ASC for short tasks, DESC for long ones
//!
//! The sort is stable, so fully tied tasks keep their input order.

use chrono::NaiveDateTime;
use std::cmp::Reverse;

use crate::settings::PlannerSettings;
use crate::task::Task;

/// Composite sort key, computed once per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    priority_class: u8,
    seconds_to_deadline: i64,
    time_commitment: Reverse<u32>,
    difficulty: i64,
}

impl RankKey {
    pub fn for_task(task: &Task, short_task_max_hours: u32) -> Self {
        Self {
            priority_class: task.priority_class,
            seconds_to_deadline: task.seconds_to_deadline,
            time_commitment: Reverse(task.time_commitment),
            difficulty: difficulty_key(task, short_task_max_hours),
        }
    }
}

/// Easier-first for short tasks, harder-first for long ones.
fn difficulty_key(task: &Task, short_task_max_hours: u32) -> i64 {
    let d = i64::from(task.difficulty);
    if task.is_short(short_task_max_hours) { d } else { -d }
}

/// Refresh derived fields against `now`, then sort in place.
pub fn rank(tasks: &mut [Task], now: NaiveDateTime) {
    rank_with(tasks, now, &PlannerSettings::default());
}

pub fn rank_with(tasks: &mut [Task], now: NaiveDateTime, settings: &PlannerSettings) {
    for t in tasks.iter_mut() {
        t.refresh_derived(now);
    }
    // sort_by_cached_key is stable and evaluates the key once per element.
    tasks.sort_by_cached_key(|t| RankKey::for_task(t, settings.short_task_max_hours));
}
