//! fortnight-core: task model, priority ranking and two-week allocation.
//!
//! The engine is pure: callers hand in tasks and a "now", and get back a
//! ranked list plus a calendar. Loading, saving and printing live elsewhere.

pub mod allocator;
pub mod calendar;
pub mod diagnostics;
pub mod ranking;
pub mod settings;
pub mod task;
pub mod time;

pub use allocator::{schedule, schedule_with, ScheduleOutcome};
pub use calendar::{Calendar, Day, Placement};
pub use diagnostics::ScheduleDiagnostic;
pub use ranking::{rank, rank_with, RankKey};
pub use settings::PlannerSettings;
pub use task::{Group, Task, ValidationError};
pub use time::{format_deadline, human_time_left, parse_deadline, DEADLINE_FORMAT};
