//! Terminal rendering for the calendar, the ranked list and diagnostics.

use chrono::NaiveDateTime;
use fortnight_core::{Calendar, Group, ScheduleOutcome, Task};
use std::fmt::Write;

/// "school" -> "School"; other labels get their first letter raised.
pub fn group_label(group: &Group) -> String {
    let s = group.as_str();
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_calendar(calendar: &Calendar, ranked: &[Task], newest_first: bool) -> String {
    let mut out = String::new();
    out.push_str("\nSchedule for the Next Two Weeks:\n");
    out.push_str("--------------------------------\n");

    let mut days: Vec<_> = calendar.days.iter().collect();
    if newest_first {
        days.reverse();
    }

    for day in days {
        let _ = writeln!(out, "\n{}:", day.date.format("%d %b %a"));
        if day.is_empty() {
            out.push_str("No tasks scheduled.\n");
            continue;
        }
        for p in &day.placements {
            let Some(task) = ranked.get(p.task) else { continue };
            let _ = writeln!(
                out,
                "- {} ({}) - {}h",
                task.name,
                group_label(&task.group),
                p.hours
            );
        }
    }
    out
}

pub fn render_task_line(task: &Task, now: NaiveDateTime) -> String {
    format!(
        "{} | {} | Time: {}h | Difficulty: {} | Deadline: {} ({})",
        task.name,
        group_label(&task.group),
        task.time_commitment,
        task.difficulty,
        task.deadline_text(),
        task.human_time_left(now)
    )
}

pub fn render_task_list(ranked: &[Task], now: NaiveDateTime) -> String {
    if ranked.is_empty() {
        return "\nNo tasks to display.\n".to_string();
    }
    let mut out = String::new();
    out.push_str("\nPrioritized Task List:\n");
    out.push_str("----------------------\n");
    for (i, t) in ranked.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, render_task_line(t, now));
    }
    out
}

/// Diagnostics first, then one attention line naming every unscheduled task.
pub fn render_problems(outcome: &ScheduleOutcome, ranked: &[Task]) -> Option<String> {
    if outcome.diagnostics.is_empty() && outcome.unscheduled.is_empty() {
        return None;
    }
    let mut out = String::new();
    for d in &outcome.diagnostics {
        let _ = writeln!(out, "{d}");
    }

    let names: Vec<String> = outcome
        .unscheduled_tasks(ranked)
        .iter()
        .map(|t| format!("'{}'", t.name))
        .collect();
    if !names.is_empty() {
        let names = names.join(", ");
        let _ = writeln!(
            out,
            "\nATTENTION - {names} cannot be scheduled, either delete the task or extend the deadline for {names}"
        );
    }
    Some(out)
}
