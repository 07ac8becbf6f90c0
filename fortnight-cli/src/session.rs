//! The task list owned by the CLI for one run: load, rank, schedule, save.

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use fortnight_core::{rank_with, schedule_with, PlannerSettings, ScheduleOutcome, Task};
use fortnight_store::{load_tasks, save_tasks_keeping, SkippedRow};
use std::path::PathBuf;

pub struct Session {
    pub tasks_path: PathBuf,
    pub settings: PlannerSettings,
    pub tasks: Vec<Task>,
    /// Unreadable rows from the file; written back untouched on save.
    pub unreadable: Vec<SkippedRow>,
}

impl Session {
    pub fn open(tasks_path: PathBuf, settings: PlannerSettings) -> Result<Self> {
        let report = load_tasks(&tasks_path)?;
        for row in &report.skipped {
            eprintln!(
                "warning: {}:{}: skipped ({}); the line is kept as is",
                tasks_path.display(),
                row.line,
                row.reason
            );
        }
        Ok(Self {
            tasks_path,
            settings,
            tasks: report.tasks,
            unreadable: report.skipped,
        })
    }

    /// Put the list in priority order without scheduling it.
    pub fn rank(&mut self, now: NaiveDateTime) {
        rank_with(&mut self.tasks, now, &self.settings);
    }

    /// Rank the list in place and schedule it.
    pub fn plan(&mut self, now: NaiveDateTime) -> ScheduleOutcome {
        self.rank(now);
        schedule_with(&self.tasks, now, &self.settings)
    }

    pub fn save(&self) -> Result<()> {
        save_tasks_keeping(&self.tasks_path, &self.tasks, &self.unreadable)
    }

    pub fn add(&mut self, task: Task) -> Result<()> {
        tracing::info!(task = %task.name, "adding task");
        self.tasks.push(task);
        self.save()
    }

    /// Remove the `number`-th task (1-based, current order) and save.
    pub fn delete(&mut self, number: usize) -> Result<Task> {
        if number == 0 || number > self.tasks.len() {
            bail!(
                "no task number {number} (there are {} tasks)",
                self.tasks.len()
            );
        }
        let removed = self.tasks.remove(number - 1);
        tracing::info!(task = %removed.name, "deleted task");
        self.save()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortnight_core::parse_deadline;

    fn now() -> NaiveDateTime {
        parse_deadline("2026-03-02 09:00").unwrap()
    }

    #[test]
    fn add_plan_delete_persists_each_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        let mut s = Session::open(path.clone(), PlannerSettings::default()).unwrap();
        assert!(s.tasks.is_empty());

        s.add(Task::from_raw("Gym", "extra", "1", "1", "2026-03-04 07:00").unwrap())
            .unwrap();
        s.add(Task::from_raw("Essay", "school", "4", "5", "2026-03-06 12:00").unwrap())
            .unwrap();

        let out = s.plan(now());
        assert_eq!(s.tasks[0].name, "Essay");
        assert!(out.is_fully_scheduled());

        let removed = s.delete(1).unwrap();
        assert_eq!(removed.name, "Essay");
        assert!(s.delete(5).is_err());

        let reopened = Session::open(path, PlannerSettings::default()).unwrap();
        assert_eq!(reopened.tasks.len(), 1);
        assert_eq!(reopened.tasks[0].name, "Gym");
    }

    #[test]
    fn unreadable_rows_survive_add_and_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        std::fs::write(
            &path,
            "Keep | work | 1 | 1 | 2099-01-01 10:00\n\
             Typo row | school | 3h | 2 | 2099-01-02 10:00\n",
        )
        .unwrap();

        let mut s = Session::open(path.clone(), PlannerSettings::default()).unwrap();
        assert_eq!(s.tasks.len(), 1);
        assert_eq!(s.unreadable.len(), 1);

        s.add(Task::from_raw("New", "extra", "1", "1", "2099-01-03 10:00").unwrap())
            .unwrap();
        s.delete(1).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Typo row | school | 3h | 2 | 2099-01-02 10:00\n"));
        assert!(!text.contains("Keep"));
        assert!(text.contains("New | extra | 1 | 1 | 2099-01-03 10:00"));

        let reopened = Session::open(path, PlannerSettings::default()).unwrap();
        assert_eq!(reopened.tasks.len(), 1);
        assert_eq!(reopened.unreadable.len(), 1);
    }

    #[test]
    fn rank_orders_without_scheduling() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = Session::open(dir.path().join("tasks.txt"), PlannerSettings::default()).unwrap();
        s.tasks = vec![
            Task::from_raw("Gym", "extra", "1", "1", "2026-03-04 07:00").unwrap(),
            Task::from_raw("Shift", "work", "3", "1", "2026-03-05 07:00").unwrap(),
        ];
        s.rank(now());
        assert_eq!(s.tasks[0].name, "Shift");
        assert!(s.tasks[0].seconds_to_deadline > 0);
    }
}
