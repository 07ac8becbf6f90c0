use chrono::{Duration, NaiveDateTime};
use fortnight_core::{
    human_time_left, parse_deadline, rank, schedule, Group, Placement, ScheduleDiagnostic, Task,
};

fn now() -> NaiveDateTime {
    parse_deadline("2026-02-19 12:00").unwrap()
}

fn raw(name: &str, group: &str, hours: &str, difficulty: &str, deadline: &str) -> Task {
    Task::from_raw(name, group, hours, difficulty, deadline).unwrap()
}

/// A realistic two weeks: more work than fits, across all groups.
fn busy_fortnight() -> Vec<Task> {
    vec![
        raw("Gym", "extra", "1", "2", "2026-02-21 07:00"),
        raw("Stats problem set", "school", "4", "7", "2026-02-23 23:59"),
        raw("Quarterly report", "work", "10", "6", "2026-02-25 17:00"),
        raw("Read ch. 4", "school", "2", "3", "2026-02-20 09:00"),
        raw("Guitar practice", "music", "2", "1", "2026-02-27 20:00"),
        raw("Capstone", "school", "30", "9", "2026-03-04 12:00"),
        raw("Inbox zero", "work", "1", "1", "2026-02-20 18:00"),
        raw("Volunteer shift", "extra", "6", "4", "2026-02-22 08:00"),
        raw("Late essay", "school", "3", "5", "2026-02-18 12:00"),
        raw("Team offsite prep", "work", "8", "4", "2026-03-10 09:00"),
        raw("Side project", "extra", "40", "8", "2026-03-20 09:00"),
    ]
}

#[test]
fn ranking_is_deterministic_across_runs() {
    let mut a = busy_fortnight();
    let mut b = busy_fortnight();
    rank(&mut a, now());
    rank(&mut b, now());
    assert_eq!(a, b);

    // school block first, overdue essay at the very top
    assert_eq!(a[0].name, "Late essay");
    assert!(a.iter().take(4).all(|t| t.group == Group::School));
    assert_eq!(a.last().unwrap().name, "Side project");
}

#[test]
fn capacity_invariant_holds_after_a_busy_pass() {
    let mut tasks = busy_fortnight();
    rank(&mut tasks, now());
    let out = schedule(&tasks, now());

    assert_eq!(out.calendar.days.len(), 14);
    for day in &out.calendar.days {
        assert_eq!(day.allocated_hours() + day.remaining_capacity_hours, 6);
    }
    for (i, t) in tasks.iter().enumerate() {
        assert!(
            out.calendar.hours_for(i) <= t.time_commitment,
            "{} over-allocated",
            t.name
        );
    }
}

#[test]
fn overdue_task_is_unscheduled_without_placements() {
    let mut tasks = busy_fortnight();
    rank(&mut tasks, now());
    let out = schedule(&tasks, now());

    let late = tasks.iter().position(|t| t.name == "Late essay").unwrap();
    assert!(out.unscheduled.contains(&late));
    assert_eq!(out.calendar.hours_for(late), 0);
    assert!(out.diagnostics.contains(&ScheduleDiagnostic::NoDaysBeforeDeadline {
        task: late,
        name: "Late essay".to_string(),
        deadline: tasks[late].deadline,
    }));
}

#[test]
fn every_unscheduled_task_has_a_diagnostic() {
    let mut tasks = busy_fortnight();
    rank(&mut tasks, now());
    let out = schedule(&tasks, now());

    assert!(!out.unscheduled.is_empty());
    for idx in &out.unscheduled {
        assert!(out.diagnostics.iter().any(|d| d.task() == *idx));
    }
}

#[test]
fn school_task_takes_over_a_day_full_of_extra() {
    let mut tasks = vec![
        raw("Hike", "extra", "6", "1", "2026-02-20 18:00"),
        raw("Midterm review", "school", "6", "8", "2026-02-20 18:00"),
    ];
    // Schedule in the given order so the extra task is placed first.
    let out = schedule(&tasks, now());
    assert_eq!(out.calendar.days[0].placements, vec![Placement { task: 1, hours: 6 }]);
    assert_eq!(out.unscheduled_tasks(&tasks)[0].name, "Hike");

    // Ranked, the school task simply goes first and the extra one cannot fit.
    rank(&mut tasks, now());
    let out = schedule(&tasks, now());
    assert_eq!(tasks[0].name, "Midterm review");
    assert_eq!(out.calendar.hours_for(0), 6);
    assert_eq!(out.unscheduled.iter().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn countdown_strings() {
    let t = raw("x", "work", "1", "1", "2026-02-19 13:30");
    assert_eq!(t.human_time_left(now()), "1 hour, 30 minutes left");
    assert_eq!(human_time_left(now() + Duration::hours(25), now()), "1 day, 1 hour left");
    assert_eq!(human_time_left(now(), now()), "Overdue");
}
