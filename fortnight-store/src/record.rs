//! Rendering tasks back into record lines.

use anyhow::{bail, Result};
use fortnight_core::Task;

/// name, group, time commitment, difficulty, deadline
pub const FIELD_COUNT: usize = 5;

const DELIMITER: &str = " | ";

/// Render one task as a record line (no trailing newline).
///
/// Fails when a text field would break the line format.
pub fn render_record(task: &Task) -> Result<String> {
    for (label, value) in [("name", task.name.as_str()), ("group", task.group.as_str())] {
        if value.contains('|') || value.contains('\n') || value.contains('\r') {
            bail!("task {label} '{value}' cannot contain '|' or line breaks");
        }
    }

    Ok([
        task.name.clone(),
        task.group.to_string(),
        task.time_commitment.to_string(),
        task.difficulty.to_string(),
        task.deadline_text(),
    ]
    .join(DELIMITER))
}

/// Render a whole task list, one line per task.
pub fn render_records(tasks: &[Task]) -> Result<String> {
    let mut out = String::new();
    for t in tasks {
        out.push_str(&render_record(t)?);
        out.push('\n');
    }
    Ok(out)
}
