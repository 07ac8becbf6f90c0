//! fortnight-store: flat-file persistence for the task list.
//!
//! One task per line, pipe-separated:
//!
//! ```text
//! Stats problem set | school | 4 | 7 | 2026-02-23 23:59
//! ```

pub mod flat_file;
pub mod record;

pub use flat_file::{
    load_tasks, parse_tasks, save_tasks, save_tasks_keeping, LoadReport, SkippedRow,
};
pub use record::{render_record, render_records, FIELD_COUNT};
