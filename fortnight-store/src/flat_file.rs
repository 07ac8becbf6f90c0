//! Load/save the task file.
//!
//! Reading goes through the csv reader with `|` as delimiter. Lines that do not
//! have exactly five fields are skipped, as are rows that fail task validation.
//! Skipped rows keep their raw text so a later save can write them back.
//! A missing file is an empty task list.

use anyhow::{Context, Result};
use fortnight_core::Task;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::record::{render_records, FIELD_COUNT};

/// A line that could not be read as a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source.
    pub line: u64,
    pub reason: String,
    /// The line exactly as it appeared, without its line ending.
    pub raw: String,
}

/// Tasks read from a file plus the rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub skipped: Vec<SkippedRow>,
}

/// Parse record lines from any reader.
pub fn parse_tasks(mut reader: impl Read) -> Result<LoadReport> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("reading task records")?;
    let raw_lines: Vec<&str> = text.lines().collect();
    let raw_at = |line: u64| -> String {
        usize::try_from(line)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| raw_lines.get(i))
            .map(|s| s.to_string())
            .unwrap_or_default()
    };

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut report = LoadReport::default();

    for result in rdr.records() {
        let record = result.context("reading task record")?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        if record.len() != FIELD_COUNT {
            let reason = format!("expected {FIELD_COUNT} fields, found {}", record.len());
            tracing::warn!(line, %reason, "skipping task record");
            report.skipped.push(SkippedRow {
                line,
                reason,
                raw: raw_at(line),
            });
            continue;
        }

        match Task::from_raw(&record[0], &record[1], &record[2], &record[3], &record[4]) {
            Ok(t) => report.tasks.push(t),
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping invalid task record");
                report.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                    raw: raw_at(line),
                });
            }
        }
    }

    Ok(report)
}

/// Load the task file at `path`; a missing file yields no tasks.
pub fn load_tasks(path: impl AsRef<Path>) -> Result<LoadReport> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "task file not found, starting empty");
        return Ok(LoadReport::default());
    }
    let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let report = parse_tasks(file).with_context(|| format!("parse {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        loaded = report.tasks.len(),
        skipped = report.skipped.len(),
        "loaded tasks"
    );
    Ok(report)
}

/// Rewrite the whole task file.
pub fn save_tasks(path: impl AsRef<Path>, tasks: &[Task]) -> Result<()> {
    save_tasks_keeping(path, tasks, &[])
}

/// Rewrite the task file, appending previously skipped rows unchanged after
/// the tasks.
pub fn save_tasks_keeping(
    path: impl AsRef<Path>,
    tasks: &[Task],
    kept: &[SkippedRow],
) -> Result<()> {
    let path = path.as_ref();
    let mut body = render_records(tasks)?;
    for row in kept {
        body.push_str(&row.raw);
        body.push('\n');
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        count = tasks.len(),
        kept = kept.len(),
        "saved tasks"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortnight_core::Group;

    #[test]
    fn parses_trimmed_fields() {
        let text = "Stats pset | school | 4 | 7 | 2026-02-23 23:59\nInbox|work|1|1|2026-02-20 18:00\n";
        let report = parse_tasks(text.as_bytes()).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.tasks.len(), 2);
        assert_eq!(report.tasks[0].name, "Stats pset");
        assert_eq!(report.tasks[0].group, Group::School);
        assert_eq!(report.tasks[1].time_commitment, 1);
    }

    #[test]
    fn skips_blank_short_and_invalid_rows() {
        let text = "\n\
            only | three | fields\n\
            Bad hours | work | lots | 1 | 2026-02-20 18:00\n\
            Good | extra | 2 | 0 | 2026-02-21 07:00\n";
        let report = parse_tasks(text.as_bytes()).unwrap();
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].name, "Good");
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped[0].reason.contains("expected 5 fields"));
        assert_eq!(report.skipped[0].line, 2);
        assert!(report.skipped[1].reason.contains("time commitment"));
        assert_eq!(report.skipped[1].line, 3);
    }

    #[test]
    fn skipped_rows_keep_their_raw_text() {
        let text = "Keep | work | 1 | 1 | 2099-01-01 10:00\r\nTypo row | school | 3h | 2 | 2099-01-02 10:00\r\n";
        let report = parse_tasks(text.as_bytes()).unwrap();
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(
            report.skipped[0].raw,
            "Typo row | school | 3h | 2 | 2099-01-02 10:00"
        );
    }

    #[test]
    fn quotes_are_plain_text() {
        let text = "\"Quoted\" talk | work | 1 | 1 | 2026-02-20 18:00\n";
        let report = parse_tasks(text.as_bytes()).unwrap();
        assert_eq!(report.tasks[0].name, "\"Quoted\" talk");
    }
}
