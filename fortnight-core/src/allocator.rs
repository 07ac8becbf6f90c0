//! Allocator: greedy bin-packing of task hours into the calendar.
//!
//! Tasks are processed in ranked order. For each task:
//! - the deadline day itself is never worked; the window is today..=deadline-1
//! - short tasks go whole onto the first day that has room
//! - long tasks are spread over the window, earliest days first
//! - a full day may be cleared of every strictly lower-priority placement when
//!   that frees enough hours; evicted tasks are not retried in the same pass
//!
//! A long task that still has hours left after its window keeps whatever it
//! already placed and is also reported as unscheduled.

use chrono::{Days, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::calendar::{Calendar, Placement};
use crate::diagnostics::ScheduleDiagnostic;
use crate::settings::PlannerSettings;
use crate::task::Task;
use crate::time::day_of;

/// Result of one scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleOutcome {
    pub calendar: Calendar,
    /// Ranked positions of tasks with zero or insufficient hours placed.
    pub unscheduled: BTreeSet<usize>,
    pub diagnostics: Vec<ScheduleDiagnostic>,
}

impl ScheduleOutcome {
    pub fn unscheduled_tasks<'a>(&self, ranked: &'a [Task]) -> Vec<&'a Task> {
        self.unscheduled
            .iter()
            .filter_map(|&i| ranked.get(i))
            .collect()
    }

    pub fn is_fully_scheduled(&self) -> bool {
        self.unscheduled.is_empty()
    }
}

/// Schedule ranked tasks with the default settings (6h/day over 14 days).
pub fn schedule(ranked: &[Task], now: NaiveDateTime) -> ScheduleOutcome {
    schedule_with(ranked, now, &PlannerSettings::default())
}

pub fn schedule_with(
    ranked: &[Task],
    now: NaiveDateTime,
    settings: &PlannerSettings,
) -> ScheduleOutcome {
    let mut alloc = Allocator::new(ranked, now, settings);
    for idx in 0..ranked.len() {
        alloc.allocate(idx);
    }

    let outcome = alloc.finish();
    if !outcome.unscheduled.is_empty() {
        tracing::warn!(
            unscheduled = outcome.unscheduled.len(),
            total = ranked.len(),
            "scheduling pass left tasks unscheduled"
        );
    }
    outcome
}

struct Allocator<'a> {
    tasks: &'a [Task],
    settings: &'a PlannerSettings,
    now: NaiveDateTime,
    calendar: Calendar,
    unscheduled: BTreeSet<usize>,
    diagnostics: Vec<ScheduleDiagnostic>,
}

impl<'a> Allocator<'a> {
    fn new(tasks: &'a [Task], now: NaiveDateTime, settings: &'a PlannerSettings) -> Self {
        Self {
            tasks,
            settings,
            now,
            calendar: Calendar::new(day_of(now), settings),
            unscheduled: BTreeSet::new(),
            diagnostics: Vec::new(),
        }
    }

    fn finish(self) -> ScheduleOutcome {
        ScheduleOutcome {
            calendar: self.calendar,
            unscheduled: self.unscheduled,
            diagnostics: self.diagnostics,
        }
    }

    fn allocate(&mut self, idx: usize) {
        let task = &self.tasks[idx];
        let window = self.window_len(task);
        if window == 0 {
            tracing::warn!(task = %task.name, deadline = %task.deadline, "no days left before deadline");
            self.unscheduled.insert(idx);
            self.diagnostics.push(ScheduleDiagnostic::NoDaysBeforeDeadline {
                task: idx,
                name: task.name.clone(),
                deadline: task.deadline,
            });
            return;
        }

        if task.is_short(self.settings.short_task_max_hours) {
            self.allocate_short(idx, window);
        } else {
            self.allocate_long(idx, window);
        }
    }

    /// Number of calendar days usable by `task`, counted from today.
    fn window_len(&self, task: &Task) -> usize {
        let today = day_of(self.now);
        let Some(last_day) = task.deadline.date().checked_sub_days(Days::new(1)) else {
            return 0;
        };
        let days_left = (last_day - today).num_days() + 1;
        if days_left <= 0 {
            return 0;
        }
        usize::try_from(days_left)
            .unwrap_or(usize::MAX)
            .min(self.calendar.days.len())
    }

    fn allocate_short(&mut self, idx: usize, window: usize) {
        let hours = self.tasks[idx].time_commitment;

        for d in 0..window {
            let free = self.calendar.days[d].remaining_capacity_hours;
            if free >= hours {
                self.place(d, idx, hours);
                return;
            }
            if self.evict_lower_priority(d, idx, hours - free) {
                self.place(d, idx, hours);
                return;
            }
        }

        let task = &self.tasks[idx];
        tracing::warn!(task = %task.name, hours, "no single day can hold short task");
        self.unscheduled.insert(idx);
        self.diagnostics.push(ScheduleDiagnostic::NoRoomForShortTask {
            task: idx,
            name: task.name.clone(),
            hours,
        });
    }

    fn allocate_long(&mut self, idx: usize, window: usize) {
        let mut remaining = self.tasks[idx].time_commitment;

        for d in 0..window {
            if remaining == 0 {
                break;
            }
            let free = self.calendar.days[d].remaining_capacity_hours;
            let mut allocation = remaining.min(free);
            if allocation == 0 {
                let needed = remaining.min(self.settings.daily_capacity_hours) - free;
                if !self.evict_lower_priority(d, idx, needed) {
                    continue;
                }
                allocation = remaining.min(self.calendar.days[d].remaining_capacity_hours);
            }
            if allocation > 0 {
                self.place(d, idx, allocation);
                remaining -= allocation;
            }
        }

        if remaining > 0 {
            let task = &self.tasks[idx];
            tracing::warn!(task = %task.name, unmet_hours = remaining, "task only partially scheduled");
            self.unscheduled.insert(idx);
            self.diagnostics.push(ScheduleDiagnostic::PartiallyScheduled {
                task: idx,
                name: task.name.clone(),
                unmet_hours: remaining,
            });
        }
    }

    fn place(&mut self, d: usize, idx: usize, hours: u32) {
        let day = &mut self.calendar.days[d];
        tracing::debug!(task = %self.tasks[idx].name, date = %day.date, hours, "placed");
        day.place(idx, hours);
    }

    /// Clear day `d` of every placement whose task has a strictly worse
    /// priority class than task `idx`, but only if together they free at
    /// least `needed` hours. Returns whether anything was evicted.
    fn evict_lower_priority(&mut self, d: usize, idx: usize, needed: u32) -> bool {
        let tasks = self.tasks;
        let class = tasks[idx].priority_class;
        let is_lower = |p: &Placement| tasks[p.task].priority_class > class;

        let day = &mut self.calendar.days[d];
        let freed = day.hours_where(is_lower);
        if freed < needed {
            return false;
        }

        let date = day.date;
        for p in day.evict_where(is_lower) {
            let victim = &tasks[p.task];
            tracing::debug!(
                task = %victim.name,
                by = %tasks[idx].name,
                date = %date,
                hours = p.hours,
                "evicted lower-priority placement"
            );
            self.unscheduled.insert(p.task);
            self.diagnostics.push(ScheduleDiagnostic::Evicted {
                task: p.task,
                name: victim.name.clone(),
                date,
                hours: p.hours,
                by: idx,
            });
        }
        true
    }
}
