//! Fixed-capacity day-by-day calendar.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::settings::PlannerSettings;

/// Hours of one task placed on one day. `task` is the ranked position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub task: usize,
    pub hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    pub remaining_capacity_hours: u32,
    pub placements: Vec<Placement>,
}

impl Day {
    fn new(date: NaiveDate, capacity: u32) -> Self {
        Self {
            date,
            remaining_capacity_hours: capacity,
            placements: Vec::new(),
        }
    }

    pub fn allocated_hours(&self) -> u32 {
        self.placements.iter().map(|p| p.hours).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Caller guarantees `hours <= remaining_capacity_hours`.
    pub(crate) fn place(&mut self, task: usize, hours: u32) {
        debug_assert!(hours <= self.remaining_capacity_hours);
        self.remaining_capacity_hours -= hours;
        self.placements.push(Placement { task, hours });
    }

    /// Hours held by placements matching `pred`.
    pub(crate) fn hours_where(&self, pred: impl Fn(&Placement) -> bool) -> u32 {
        self.placements.iter().filter(|p| pred(p)).map(|p| p.hours).sum()
    }

    /// Remove every placement matching `pred`, returning them and giving
    /// their hours back to the day.
    pub(crate) fn evict_where(&mut self, pred: impl Fn(&Placement) -> bool) -> Vec<Placement> {
        let (evicted, kept): (Vec<Placement>, Vec<Placement>) =
            std::mem::take(&mut self.placements).into_iter().partition(|p| pred(p));
        self.placements = kept;
        self.remaining_capacity_hours += evicted.iter().map(|p| p.hours).sum::<u32>();
        evicted
    }
}

/// Consecutive days starting today, rebuilt on every scheduling pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub daily_capacity_hours: u32,
    pub days: Vec<Day>,
}

impl Calendar {
    pub fn new(today: NaiveDate, settings: &PlannerSettings) -> Self {
        let days = (0..settings.horizon_days)
            .filter_map(|i| today.checked_add_days(Days::new(u64::from(i))))
            .map(|date| Day::new(date, settings.daily_capacity_hours))
            .collect();
        Self {
            daily_capacity_hours: settings.daily_capacity_hours,
            days,
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Total hours placed for a task across the whole calendar.
    pub fn hours_for(&self, task: usize) -> u32 {
        self.days
            .iter()
            .map(|d| d.hours_where(|p| p.task == task))
            .sum()
    }

    /// Capacity invariant: allocated + remaining == daily capacity, every day.
    pub fn is_consistent(&self) -> bool {
        self.days
            .iter()
            .all(|d| d.allocated_hours() + d.remaining_capacity_hours == self.daily_capacity_hours)
    }
}
