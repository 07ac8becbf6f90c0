//! Line prompts used by `add`, `delete` and the interactive menu.

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use fortnight_core::parse_deadline;
use std::io::{BufRead, Write};

pub fn prompt(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> Result<String> {
    write!(output, "{}", label)?;
    output.flush().ok();
    let mut s = String::new();
    if input.read_line(&mut s)? == 0 {
        bail!("input closed");
    }
    Ok(s.trim().to_string())
}

/// Ask `label`, then keep asking `retry` until `accept` returns a value.
pub fn prompt_until<T>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
    retry: &str,
    accept: impl Fn(&str) -> Option<T>,
) -> Result<T> {
    let mut answer = prompt(input, output, label)?;
    loop {
        if let Some(v) = accept(&answer) {
            return Ok(v);
        }
        answer = prompt(input, output, retry)?;
    }
}

pub fn accept_name(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty() && !s.contains('|')).then(|| s.to_string())
}

pub fn accept_group(s: &str) -> Option<String> {
    let g = s.trim().to_lowercase();
    matches!(g.as_str(), "school" | "work" | "extra").then_some(g)
}

pub fn accept_digits(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn accept_hours(s: &str) -> Option<u32> {
    accept_digits(s).filter(|h| *h > 0)
}

pub fn accept_future_deadline(s: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    parse_deadline(s).ok().filter(|d| *d > now)
}

pub const DEADLINE_HINT: &str = "YYYY-MM-DD HH:MM";
