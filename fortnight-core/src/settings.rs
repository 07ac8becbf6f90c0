//! Planner knobs shared by ranking and allocation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_CAPACITY_HOURS: u32 = 6;
pub const DEFAULT_HORIZON_DAYS: u32 = 14;
pub const DEFAULT_SHORT_TASK_MAX_HOURS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Work hours available on each calendar day.
    pub daily_capacity_hours: u32,
    /// Number of consecutive days in the calendar, starting today.
    pub horizon_days: u32,
    /// Tasks at or below this many hours are never split across days.
    pub short_task_max_hours: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            daily_capacity_hours: DEFAULT_DAILY_CAPACITY_HOURS,
            horizon_days: DEFAULT_HORIZON_DAYS,
            short_task_max_hours: DEFAULT_SHORT_TASK_MAX_HOURS,
        }
    }
}

impl PlannerSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.daily_capacity_hours == 0 {
            return Err("daily_capacity_hours must be at least 1".to_string());
        }
        if self.horizon_days == 0 {
            return Err("horizon_days must be at least 1".to_string());
        }
        Ok(())
    }
}
